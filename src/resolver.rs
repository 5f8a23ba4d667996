//! # Resolución de Rutas
//! src/resolver.rs
//!
//! Convierte el target crudo de un request en una ubicación del filesystem
//! dentro del docroot, o lo rechaza. Pasos, en orden:
//!
//! 1. Separar el componente path del target (descartar query y fragment;
//!    aceptar la forma absoluta `http://host/path`)
//! 2. Percent-decodificar (el resultado decodificado es además la clave de
//!    los contadores)
//! 3. Normalizar léxicamente (colapsar `.` y `..`)
//! 4. Unir al docroot y canonicalizar
//! 5. Exigir que la forma canónica quede en el docroot o debajo de él,
//!    comparando componentes de path (no prefijos de string)
//!
//! Cualquier falla se responde como 404. Un path que escapa del docroot es
//! indistinguible de uno inexistente: la respuesta no revela dónde termina
//! el árbol servido.

use path_clean::PathClean;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Ubicación resuelta dentro del docroot
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    /// Path de la URL tal como llegó, sin query ni fragment, con `/`
    /// inicial garantizado y todavía percent-encodeado. Es lo que se usa
    /// para el redirect 301 y los hrefs de los listados.
    pub url_path: String,

    /// Path percent-decodificado. Es la clave del store de contadores.
    pub decoded: String,

    /// Path canónico en el filesystem (absoluto, symlinks resueltos)
    pub fs_path: PathBuf,

    /// Si la ubicación es un directorio
    pub is_dir: bool,
}

/// Fallas de resolución; ambas se responden como 404
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// El path no existe dentro del docroot
    Missing,

    /// La forma canónica escapa del docroot
    Outside,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Missing => write!(f, "path not found"),
            ResolveError::Outside => write!(f, "path escapes docroot"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Extrae el componente path del target, descartando query y fragment.
///
/// Acepta la forma absoluta (`http://host/path`) quedándose solo con el
/// path, y garantiza el `/` inicial.
fn target_path(target: &str) -> String {
    let without_fragment = target.split('#').next().unwrap_or(target);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);

    let path = if let Some(rest) = without_query
        .strip_prefix("http://")
        .or_else(|| without_query.strip_prefix("https://"))
    {
        match rest.find('/') {
            Some(slash) => &rest[slash..],
            None => "/",
        }
    } else {
        without_query
    };

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Resuelve un target crudo contra el docroot canónico.
///
/// `docroot` debe venir ya canonicalizado (el servidor lo hace una sola
/// vez al arrancar). El `/` solo denota el docroot mismo.
///
/// # Ejemplo
///
/// ```no_run
/// use static_server::resolver::resolve;
/// use std::path::Path;
///
/// let docroot = Path::new("/srv/content").canonicalize().unwrap();
/// let location = resolve("/books/book1.txt?x=1", &docroot).unwrap();
/// assert_eq!(location.url_path, "/books/book1.txt");
/// ```
pub fn resolve(target: &str, docroot: &Path) -> Result<ResolvedLocation, ResolveError> {
    let url_path = target_path(target);
    let decoded = percent_decode_str(&url_path)
        .decode_utf8_lossy()
        .to_string();

    // Normalización léxica: "." y ".." se colapsan acá; un ".." que quede
    // al inicio solo puede apuntar fuera del docroot y lo atrapa el chequeo
    // de contención de abajo.
    let relative = Path::new(decoded.trim_start_matches('/')).clean();
    let candidate = docroot.join(relative);

    let fs_path = candidate.canonicalize().map_err(|_| ResolveError::Missing)?;

    // Comparación por componentes: "/srv/content-extra" no es descendiente
    // de "/srv/content" aunque comparta el prefijo de texto.
    if !fs_path.starts_with(docroot) {
        return Err(ResolveError::Outside);
    }

    let is_dir = fs_path.is_dir();

    Ok(ResolvedLocation {
        url_path,
        decoded,
        fs_path,
        is_dir,
    })
}
