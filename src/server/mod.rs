//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en el host:puerto configurado
//! 2. Acepta conexiones en un loop que corre hasta que el proceso muere
//! 3. Atiende cada conexión inline (modo sequential) o en su propio
//!    thread (modo threaded)
//! 4. Garantiza que el socket se cierra exactamente una vez y que toda
//!    falla inesperada termina en un 500 de mejor esfuerzo

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
