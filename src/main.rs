//! # Static File Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos estáticos.
//!
//! Parsea la configuración (CLI + variables de entorno), la valida y
//! arranca el accept loop, que bloquea el thread principal hasta que el
//! proceso termine.

use static_server::config::Config;
use static_server::server::Server;

fn main() {
    println!("=================================");
    println!("  RedUnix Static File Server");
    println!("  Principios de Sistemas Operativos");
    println!("=================================\n");

    // Crear configuración desde CLI args y env vars
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor (canonicaliza el docroot)
    let mut server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error al preparar el servidor: {}", e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
