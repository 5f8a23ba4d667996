//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP que el servidor necesita, desde cero,
//! sin librerías de alto nivel:
//!
//! - Lectura del socket hasta el terminador de headers y parsing de la
//!   request line
//! - Construcción de responses con los headers obligatorios
//! - Manejo de status codes
//!
//! ## El intercambio soportado
//!
//! Request: `GET <path>[?query] HTTP/<version>` más headers que se ignoran.
//! Response: status line HTTP/1.1, headers, body; siempre con
//! `Content-Length` y `Connection: close` (sin keep-alive ni pipelining).
//!
//! ```text
//! GET /books/book1.txt HTTP/1.1\r\n
//! \r\n
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! hola, mundo!\n
//! ```

pub mod request;   // Lectura y parsing de requests
pub mod response;  // Construcción de responses
pub mod status;    // Códigos de estado

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{read_request_bytes, Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
