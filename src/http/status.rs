//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado que usa el servidor de archivos.
//! Son los únicos seis que el protocolo restringido necesita:
//!
//! - **200 OK**: archivo, listado o página raíz servidos
//! - **301 Moved Permanently**: directorio sin slash final
//! - **400 Bad Request**: request malformado o demasiado grande
//! - **404 Not Found**: ruta inexistente o fuera del docroot
//! - **405 Method Not Allowed**: método distinto de GET
//! - **500 Internal Server Error**: falla inesperada atendiendo la conexión

/// Representa los códigos de estado HTTP que soporta el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 301 Moved Permanently - Directorio pedido sin slash final
    MovedPermanently = 301,

    /// 400 Bad Request - Request vacío, malformado o sobre el límite
    BadRequest = 400,

    /// 404 Not Found - Ruta inexistente (o que escapa del docroot)
    NotFound = 404,

    /// 405 Method Not Allowed - Solo se acepta GET
    MethodNotAllowed = 405,

    /// 500 Internal Server Error - Error interno del servidor
    InternalServerError = 500,
}

/// Retorna el reason phrase para un código numérico arbitrario.
///
/// Los códigos desconocidos caen en `"OK"`: el servidor nunca los genera,
/// pero el lookup es deliberadamente permisivo en vez de fallar.
///
/// # Ejemplo
/// ```
/// use static_server::http::status::reason_for;
/// assert_eq!(reason_for(404), "Not Found");
/// assert_eq!(reason_for(299), "OK");
/// ```
pub fn reason_for(code: u16) -> &'static str {
    match code {
        200 => "OK",
        301 => "Moved Permanently",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        reason_for(self.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    /// Formatea el código de estado para mostrarlo
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::MovedPermanently.reason_phrase(), "Moved Permanently");
        assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
        assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    }

    #[test]
    fn test_reason_for_known_codes() {
        assert_eq!(reason_for(200), "OK");
        assert_eq!(reason_for(404), "Not Found");
        assert_eq!(reason_for(500), "Internal Server Error");
    }

    #[test]
    fn test_reason_for_unknown_code_falls_back_to_ok() {
        // El lookup es permisivo: cualquier código fuera de la tabla → "OK"
        assert_eq!(reason_for(299), "OK");
        assert_eq!(reason_for(418), "OK");
        assert_eq!(reason_for(999), "OK");
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::MovedPermanently.to_string(), "301 Moved Permanently");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::InternalServerError.to_string(), "500 Internal Server Error");
    }
}
