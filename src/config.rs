//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de archivos estáticos
//! con soporte completo para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server --port 8080 \
//!   --docroot ./content \
//!   --mode threaded \
//!   --counters racy \
//!   --race-delay-us 500
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 COUNTER_MODE=locked ./static_server
//! ```

use clap::{Parser, ValueEnum};
use std::path::Path;

/// Modo de atención de conexiones
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServerMode {
    /// Una conexión a la vez, atendida en el mismo thread del accept
    Sequential,

    /// Un thread independiente por conexión, sin límite de threads vivos
    Threaded,
}

impl ServerMode {
    /// Nombre del modo tal como se escribe en la CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerMode::Sequential => "sequential",
            ServerMode::Threaded => "threaded",
        }
    }
}

/// Estrategia de incremento de los contadores por ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CounterMode {
    /// Leer y escribir dentro de una sola sección crítica (linealizable)
    Locked,

    /// Leer, dormir la ventana configurada y escribir sin exclusión mutua.
    /// Pierde incrementos bajo carga concurrente: es la demo de la carrera.
    Racy,
}

impl CounterMode {
    /// Nombre de la estrategia tal como se escribe en la CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterMode::Locked => "locked",
            CounterMode::Racy => "racy",
        }
    }
}

/// Configuración del servidor de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor de archivos estáticos concurrente con contadores de requests por ruta")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = efímero, lo elige el SO)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de documentos servidos
    #[arg(long, default_value = "./content", env = "DOCROOT")]
    pub docroot: String,

    // === Concurrencia ===
    /// Modo de atención de conexiones
    #[arg(long, value_enum, default_value = "threaded", env = "SERVER_MODE")]
    pub mode: ServerMode,

    /// Estrategia de incremento de los contadores
    #[arg(long, value_enum, default_value = "locked", env = "COUNTER_MODE")]
    pub counters: CounterMode,

    /// Ancho de la ventana de carrera en microsegundos (solo estrategia racy)
    #[arg(long = "race-delay-us", default_value = "500", env = "RACE_DELAY_US")]
    pub race_delay_us: u64,

    // === Presentación ===
    /// Etiqueta de variante mostrada en la página raíz
    /// (por defecto: "<modo>-<estrategia>", ej. "threaded-locked")
    #[arg(long, env = "VARIANT")]
    pub label: Option<String>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```no_run
    /// use static_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Server listening on {}", config.address());
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Etiqueta de variante que muestra la página raíz
    ///
    /// Si no se pasó `--label` (ni `VARIANT`), se arma con el modo y la
    /// estrategia: "threaded-racy", "sequential-locked", etc.
    pub fn variant_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{}-{}", self.mode.as_str(), self.counters.as_str()),
        }
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos. El puerto 0 es válido
    /// (puerto efímero, lo usan los tests); el docroot tiene que existir y
    /// ser un directorio antes de arrancar.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host must not be empty".to_string());
        }

        let docroot = Path::new(&self.docroot);
        if !docroot.exists() {
            return Err(format!("Docroot '{}' does not exist", self.docroot));
        }
        if !docroot.is_dir() {
            return Err(format!("Docroot '{}' is not a directory", self.docroot));
        }

        // Una ventana de más de un segundo por request no demuestra nada
        // que no demuestre una de milisegundos; solo cuelga al servidor.
        if self.race_delay_us > 1_000_000 {
            return Err("Race delay must be at most 1000000 us (1 second)".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║           RedUnix Static File Server Configuration           ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Docroot:      {}", self.docroot);
        println!();
        println!("🧵 Serving:");
        println!("   Mode:         {}", self.mode.as_str());
        println!("   Counters:     {}", self.counters.as_str());

        if self.counters == CounterMode::Racy {
            println!("   Race window:  {} us (read → sleep → write)", self.race_delay_us);
        }

        println!("   Variant:      {}", self.variant_label());
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            docroot: "./content".to_string(),
            mode: ServerMode::Threaded,
            counters: CounterMode::Locked,
            race_delay_us: 500,
            label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Crea un directorio temporal para usar de docroot en los tests
    fn temp_docroot(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("config_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.docroot, "./content");
        assert_eq!(config.mode, ServerMode::Threaded);
        assert_eq!(config.counters, CounterMode::Locked);
        assert_eq!(config.race_delay_us, 500);
        assert!(config.label.is_none());
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    // ==================== Validación ====================

    #[test]
    fn test_validate_success() {
        let mut config = Config::default();
        config.docroot = temp_docroot("ok");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_docroot() {
        let mut config = Config::default();
        config.docroot = "/no/existe/en/ningun/lado".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_validate_docroot_must_be_a_directory() {
        let dir = temp_docroot("archivo");
        let file = format!("{}/plano.txt", dir);
        fs::write(&file, b"x").unwrap();

        let mut config = Config::default();
        config.docroot = file;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a directory"));
    }

    #[test]
    fn test_validate_port_zero_is_allowed() {
        // Puerto 0 = efímero; los tests de integración dependen de esto
        let mut config = Config::default();
        config.docroot = temp_docroot("puerto0");
        config.port = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.docroot = temp_docroot("host");
        config.host = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Host"));
    }

    #[test]
    fn test_validate_race_delay_cap() {
        let mut config = Config::default();
        config.docroot = temp_docroot("delay");
        config.race_delay_us = 2_000_000;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Race delay"));
    }

    #[test]
    fn test_validate_race_delay_at_cap() {
        let mut config = Config::default();
        config.docroot = temp_docroot("delay_max");
        config.race_delay_us = 1_000_000;
        assert!(config.validate().is_ok());
    }

    // ==================== Etiqueta de variante ====================

    #[test]
    fn test_variant_label_default_combines_mode_and_counters() {
        let config = Config::default();
        assert_eq!(config.variant_label(), "threaded-locked");
    }

    #[test]
    fn test_variant_label_follows_mode() {
        let mut config = Config::default();
        config.mode = ServerMode::Sequential;
        config.counters = CounterMode::Racy;
        assert_eq!(config.variant_label(), "sequential-racy");
    }

    #[test]
    fn test_variant_label_override() {
        let mut config = Config::default();
        config.label = Some("lab2-demo".to_string());
        assert_eq!(config.variant_label(), "lab2-demo");
    }

    // ==================== Enums de modo ====================

    #[test]
    fn test_server_mode_as_str() {
        assert_eq!(ServerMode::Sequential.as_str(), "sequential");
        assert_eq!(ServerMode::Threaded.as_str(), "threaded");
    }

    #[test]
    fn test_counter_mode_as_str() {
        assert_eq!(CounterMode::Locked.as_str(), "locked");
        assert_eq!(CounterMode::Racy.as_str(), "racy");
    }

    // ==================== Print Summary ====================

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // Should not panic
        config.print_summary();
    }

    #[test]
    fn test_config_print_summary_racy() {
        let mut config = Config::default();
        config.counters = CounterMode::Racy;
        config.race_delay_us = 2000;
        config.label = Some("demo".to_string());
        // Should not panic
        config.print_summary();
    }

    // ==================== Valores custom ====================

    #[test]
    fn test_config_custom_values() {
        let mut config = Config::default();
        config.port = 9000;
        config.host = "0.0.0.0".to_string();
        config.mode = ServerMode::Sequential;
        config.counters = CounterMode::Racy;
        config.race_delay_us = 1500;

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.mode, ServerMode::Sequential);
        assert_eq!(config.counters, CounterMode::Racy);
        assert_eq!(config.race_delay_us, 1500);
    }
}
