//! # Despacho de Contenido
//! src/content/responder.rs
//!
//! Convierte una [`ResolvedLocation`] en la [`Response`] que corresponde.
//! Acá se decide entre redirect, index, página raíz, listado, archivo o
//! 404; el handler de la conexión solo escribe los bytes resultantes.

use crate::content::listing;
use crate::counters::CounterStore;
use crate::http::{Response, StatusCode};
use crate::resolver::ResolvedLocation;
use std::fs;
use std::path::Path;

/// Construye la respuesta para una ubicación ya resuelta.
///
/// Orden de despacho:
/// 1. Directorio pedido sin `/` final → 301 hacia el path + `/`
/// 2. Directorio con `index.html` → 200 con los bytes del index
/// 3. El docroot mismo sin index → 200 con la página de contadores
/// 4. Cualquier otro directorio sin index → 200 con el listado sintetizado
/// 5. Archivo regular → contador + 200 con Content-Type inferido
/// 6. Otra cosa → 404 con body vacío
///
/// Los errores de I/O al leer el archivo o el index se propagan: el handler
/// los convierte en el 500 de último recurso.
pub fn respond(
    location: &ResolvedLocation,
    docroot: &Path,
    counters: &CounterStore,
    label: &str,
) -> std::io::Result<Response> {
    if location.is_dir {
        // Los directorios solo se sirven en su forma canónica con slash
        // final; sin él, los hrefs relativos del listado apuntarían mal.
        if !location.url_path.ends_with('/') {
            let destination = format!("{}/", location.url_path);
            return Ok(Response::new(StatusCode::MovedPermanently)
                .with_header("Location", &destination));
        }

        let index = location.fs_path.join("index.html");
        if index.is_file() {
            let body = fs::read(&index)?;
            return Ok(Response::new(StatusCode::Ok)
                .with_header("Content-Type", "text/html; charset=utf-8")
                .with_body_bytes(body));
        }

        let html = if location.fs_path == docroot {
            listing::render_counter_page(docroot, counters, label)
        } else {
            listing::render_directory(&location.url_path, &location.fs_path)
        };
        return Ok(Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body(&html));
    }

    if location.fs_path.is_file() {
        // El incremento va antes de la lectura del body; solo los requests
        // de archivos regulares cuentan, con la ruta decodificada de clave.
        counters.increment(&location.decoded);

        let body = fs::read(&location.fs_path)?;
        let mime = mime_guess::from_path(&location.fs_path).first_or_octet_stream();
        return Ok(Response::new(StatusCode::Ok)
            .with_header("Content-Type", mime.as_ref())
            .with_body_bytes(body));
    }

    // Existe pero no es ni archivo regular ni directorio (fifo, socket...),
    // o desapareció después de resolverse. Misma respuesta que inexistente.
    Ok(Response::new(StatusCode::NotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::IncrementStrategy;
    use crate::resolver::resolve;
    use std::path::PathBuf;

    /// Arma un docroot de prueba y lo retorna canonicalizado.
    ///
    /// ```text
    /// root/
    ///   book1.txt
    ///   notes/
    ///     a.txt
    ///     b.txt
    ///   site/
    ///     index.html
    /// ```
    fn setup(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("responder_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("notes")).unwrap();
        fs::create_dir_all(dir.join("site")).unwrap();
        fs::write(dir.join("book1.txt"), b"contenido de book1").unwrap();
        fs::write(dir.join("notes").join("a.txt"), b"a").unwrap();
        fs::write(dir.join("notes").join("b.txt"), b"b").unwrap();
        fs::write(dir.join("site").join("index.html"), b"<h1>site index</h1>").unwrap();
        dir.canonicalize().unwrap()
    }

    fn teardown(docroot: &Path) {
        let _ = fs::remove_dir_all(docroot);
    }

    fn store() -> CounterStore {
        CounterStore::new(IncrementStrategy::Locked)
    }

    // ==================== Archivos ====================

    #[test]
    fn test_respond_file_serves_bytes() {
        let docroot = setup("archivo");
        let counters = store();

        let location = resolve("/book1.txt", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"contenido de book1");
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"text/plain".to_string())
        );

        teardown(&docroot);
    }

    #[test]
    fn test_respond_file_increments_counter_by_decoded_key() {
        let docroot = setup("contador");
        fs::write(docroot.join("a b.txt"), b"espacio").unwrap();
        let counters = store();

        let location = resolve("/a%20b.txt", &docroot).unwrap();
        respond(&location, &docroot, &counters, "x").unwrap();
        respond(&location, &docroot, &counters, "x").unwrap();

        // La clave es la ruta decodificada, no la encodeada del request
        assert_eq!(counters.get("/a b.txt"), 2);
        assert_eq!(counters.get("/a%20b.txt"), 0);

        teardown(&docroot);
    }

    #[test]
    fn test_respond_unknown_extension_is_octet_stream() {
        let docroot = setup("binario");
        fs::write(docroot.join("blob.qz9"), [0xDEu8, 0xAD, 0xBE, 0xEF]).unwrap();
        let counters = store();

        let location = resolve("/blob.qz9", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"application/octet-stream".to_string())
        );
        assert_eq!(response.body(), &[0xDE, 0xAD, 0xBE, 0xEF]);

        teardown(&docroot);
    }

    // ==================== Directorios ====================

    #[test]
    fn test_respond_directory_without_slash_redirects() {
        let docroot = setup("redirect");
        let counters = store();

        let location = resolve("/notes", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(response.status(), StatusCode::MovedPermanently);
        assert_eq!(response.headers().get("Location"), Some(&"/notes/".to_string()));
        assert!(response.body().is_empty());

        teardown(&docroot);
    }

    #[test]
    fn test_respond_directory_with_index_serves_index() {
        let docroot = setup("index");
        let counters = store();

        let location = resolve("/site/", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"<h1>site index</h1>");
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );

        teardown(&docroot);
    }

    #[test]
    fn test_respond_directory_without_index_lists_entries() {
        let docroot = setup("listado");
        let counters = store();

        let location = resolve("/notes/", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        let html = String::from_utf8_lossy(response.body()).into_owned();
        assert!(html.contains("/notes/a.txt"));
        assert!(html.contains("/notes/b.txt"));
        assert!(html.contains("Parent directory"));

        teardown(&docroot);
    }

    #[test]
    fn test_respond_directory_requests_do_not_count() {
        let docroot = setup("sin_contar");
        let counters = store();

        let location = resolve("/notes/", &docroot).unwrap();
        respond(&location, &docroot, &counters, "x").unwrap();
        let location = resolve("/site/", &docroot).unwrap();
        respond(&location, &docroot, &counters, "x").unwrap();

        // Ni el listado ni el index incrementan contadores
        assert!(counters.snapshot().is_empty());

        teardown(&docroot);
    }

    // ==================== Página raíz ====================

    #[test]
    fn test_respond_root_renders_counter_page() {
        let docroot = setup("raiz");
        let counters = store();
        counters.increment("/book1.txt");

        let location = resolve("/", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "threaded-locked").unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        let html = String::from_utf8_lossy(response.body()).into_owned();
        assert!(html.contains("Requests Served"));
        assert!(html.contains("/book1.txt"));
        assert!(html.contains("Variant: <strong>threaded-locked</strong>"));

        teardown(&docroot);
    }

    #[test]
    fn test_respond_root_index_wins_over_counter_page() {
        let docroot = setup("raiz_index");
        fs::write(docroot.join("index.html"), b"<h1>portada</h1>").unwrap();
        let counters = store();

        let location = resolve("/", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(response.body(), b"<h1>portada</h1>");

        teardown(&docroot);
    }

    #[test]
    fn test_respond_root_has_no_redirect() {
        let docroot = setup("raiz_slash");
        let counters = store();

        // "/" ya trae el slash final: nunca 301
        let location = resolve("/", &docroot).unwrap();
        let response = respond(&location, &docroot, &counters, "x").unwrap();
        assert_eq!(response.status(), StatusCode::Ok);

        teardown(&docroot);
    }

    // ==================== Ni archivo ni directorio ====================

    #[test]
    fn test_respond_location_gone_after_resolve_is_404() {
        let docroot = setup("desaparecido");
        let counters = store();

        // Simula un archivo borrado entre la resolución y la respuesta
        let location = ResolvedLocation {
            url_path: "/fantasma.txt".to_string(),
            decoded: "/fantasma.txt".to_string(),
            fs_path: docroot.join("fantasma.txt"),
            is_dir: false,
        };
        let response = respond(&location, &docroot, &counters, "x").unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_empty());
        assert_eq!(counters.get("/fantasma.txt"), 0);

        teardown(&docroot);
    }
}
