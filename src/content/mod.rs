//! # Módulo de Contenido
//! src/content/mod.rs
//!
//! Dada una ubicación ya resuelta dentro del docroot, este módulo decide
//! QUÉ se responde:
//! 1. Redirect 301 a la forma con slash final (directorios)
//! 2. Los bytes de `index.html` si el directorio tiene uno
//! 3. La página raíz con contadores (el docroot sin index)
//! 4. Un listado sintetizado (cualquier otro directorio sin index)
//! 5. Los bytes del archivo con su Content-Type inferido
//! 6. 404 vacío
//!
//! Todo el HTML generado pasa los valores dinámicos por percent-encoding
//! (hrefs) y HTML-escaping (texto).

pub mod listing;
pub mod responder;

// Re-exportamos la entrada principal del módulo
pub use responder::respond;
