//! # Construcción de Respuestas HTTP
//!
//! API para armar respuestas y convertirlas a bytes listos para el socket.
//!
//! Cada respuesta declara siempre `Content-Length` (largo exacto del body)
//! y `Connection: close`: el servidor no mantiene conexiones vivas. Ambos
//! headers los emite `to_bytes()`, así que ningún caller puede olvidarlos.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("hola");
//!
//! let bytes = response.to_bytes();
//! let text = String::from_utf8(bytes).unwrap();
//! assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
//! assert!(text.contains("Content-Length: 4\r\n"));
//! assert!(text.contains("Connection: close\r\n"));
//! ```

use super::StatusCode;
use std::collections::HashMap;

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP adicionales (Content-Type, Location, Allow...).
    /// Content-Length y Connection no van acá: los agrega to_bytes().
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto la respuesta no tiene headers adicionales ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::MethodNotAllowed)
    ///     .with_header("Allow", "GET");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para archivos binarios leídos del docroot.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers del caller: `Header-Name: Value\r\n`
    /// - `Content-Length` con el largo exacto del body
    /// - `Connection: close`
    /// - Línea vacía y body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // Headers obligatorios en toda respuesta
        let content_length = format!("Content-Length: {}\r\n", self.body.len());
        result.extend_from_slice(content_length.as_bytes());
        result.extend_from_slice(b"Connection: close\r\n");

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers adicionales
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
