//! # Lectura y Parsing de Requests
//! src/http/request.rs
//!
//! Parser mínimo para el intercambio estilo HTTP/1.1 que habla el servidor.
//! Solo interesa la request line:
//!
//! ```text
//! GET /books/book1.txt?x=1 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! Los headers del cliente se leen del socket (hasta el terminador `\r\n\r\n`)
//! pero no se interpretan. La request line debe separar en exactamente tres
//! tokens; cualquier otra cosa es un request malformado.
//!
//! Un método distinto de GET NO es un error de parsing: el request se parsea
//! bien y la política de métodos lo rechaza después con 405.

use std::io::Read;

/// Límite de bytes acumulados buscando el terminador de headers.
///
/// Un cliente que mande más que esto sin cerrar los headers recibe 400.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Método HTTP del request: GET o cualquier otro token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - el único método servido
    Get,

    /// Cualquier otro token de método (POST, PUT, inventados...).
    /// Se conserva para el log y para responder 405 con `Allow: GET`.
    Other(String),
}

impl Method {
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(token) => token.as_str(),
        }
    }
}

/// Representa la request line parseada
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET u otro token)
    method: Method,

    /// Target crudo tal como llegó (ej: "/books/book1.txt?x=1")
    target: String,

    /// Tercer token de la request line (ej: "HTTP/1.1"). No se valida.
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No llegó ni un byte antes del cierre de la conexión
    EmptyRequest,

    /// Se alcanzó el límite de bytes sin ver el terminador de headers
    RequestTooLarge,

    /// La request line no separa en exactamente tres tokens
    InvalidRequestLine,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::RequestTooLarge => write!(f, "Request exceeds {} bytes", MAX_REQUEST_BYTES),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Lee bytes del stream hasta ver el terminador `\r\n\r\n`, llegar al
/// límite [`MAX_REQUEST_BYTES`] o encontrar EOF, lo que ocurra primero.
///
/// Retorna los bytes acumulados sin interpretarlos; `Request::parse` decide
/// qué significan. Los errores de I/O del socket se propagan tal cual.
///
/// No hay timeout de lectura: un cliente que gotee bytes sin terminar los
/// headers retiene al handler. Limitación conocida que se conserva.
pub fn read_request_bytes<R: Read>(stream: &mut R) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..bytes_read]);

        if buffer.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
        if buffer.len() >= MAX_REQUEST_BYTES {
            break;
        }
    }

    Ok(buffer)
}

impl Request {
    /// Parsea la request line desde los bytes acumulados del socket
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request line con sus tres tokens
    /// * `Err(ParseError)` - Vacío, sobre el límite o malformado (→ 400)
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_server::http::Request;
    ///
    /// let raw = b"GET /books/book1.txt HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert!(request.is_get());
    /// assert_eq!(request.target(), "/books/book1.txt");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Si el buffer llegó al límite sin cerrar los headers, el request
        // se descarta aunque la primera línea fuera parseable.
        let has_terminator = buffer.windows(4).any(|w| w == b"\r\n\r\n");
        if !has_terminator && buffer.len() >= MAX_REQUEST_BYTES {
            return Err(ParseError::RequestTooLarge);
        }

        // Solo interesa la primera línea; el resto (headers) se ignora.
        let text = String::from_utf8_lossy(buffer);
        let line = text.split("\r\n").next().unwrap_or("");

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        Ok(Request {
            method: Method::from_token(parts[0]),
            target: parts[1].to_string(),
            version: parts[2].to_string(),
        })
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Indica si el request es un GET
    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }

    /// Obtiene el target crudo del request (path + query tal como llegó)
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene el token de versión de la request line
    pub fn version(&self) -> &str {
        &self.version
    }
}
