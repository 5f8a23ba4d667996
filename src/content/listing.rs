//! # Páginas HTML Generadas
//! src/content/listing.rs
//!
//! Genera el listado de un directorio y la página raíz con contadores.
//! Regla fija de ambos generadores: todo valor dinámico (nombres de
//! archivo, paths, etiquetas) pasa por percent-encoding en los hrefs y por
//! HTML-escaping antes de insertarse en el markup. Sin excepciones: un
//! archivo llamado `a&b.txt` debe renderizar como `a&amp;b.txt`, no romper
//! la página.

use crate::counters::CounterStore;
use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fs;
use std::path::{Path, PathBuf};

/// Caracteres que se percent-encodean en los hrefs: todo salvo los
/// no-reservados de RFC 3986 y el separador `/`.
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Paleta compartida de las páginas generadas
const PAGE_CSS: &str = "\
:root{--cream:#fbf6f0;--peach:#fde3c9;--black:#221d10;--indigo:#550c72;}\n\
*{box-sizing:border-box}\n\
body{margin:0;background:linear-gradient(135deg,var(--cream),var(--peach) 55%);\n\
     font-family:Inter,system-ui,Arial;color:var(--black)}\n\
header{padding:28px 20px;text-align:center;border-bottom:2px solid rgba(34,29,16,.08)}\n\
h1{margin:0;font-size:26px;color:var(--indigo)}\n\
.badge{display:inline-block;background:var(--peach);border:1px solid rgba(34,29,16,.18);\n\
       border-radius:999px;padding:6px 10px}\n\
.wrap{max-width:960px;margin:24px auto;padding:0 20px}\n\
.card{background:#ffffffcc;border:1px solid rgba(34,29,16,.12);border-radius:20px;\n\
      padding:20px;box-shadow:0 10px 25px rgba(34,29,16,.08)}\n\
a{color:var(--indigo);text-decoration:none} a:hover{text-decoration:underline}\n\
ul{list-style:none;margin:10px 0 0;padding:0}\n\
li{display:flex;gap:10px;align-items:center;padding:11px 0;border-top:1px solid rgba(34,29,16,.08)}\n\
li:first-child{border-top:none}\n\
table{width:100%;border-collapse:collapse;margin-top:10px}\n\
td,th{border-bottom:1px solid rgba(34,29,16,.12);padding:10px}\n\
th{text-align:left;color:#5b4e3a;font-weight:600}\n\
footer{opacity:.9;text-align:center;margin:18px 0 40px}\n";

/// Link al directorio padre: el path sin su último segmento, o `/` si ya
/// estamos en la raíz.
fn parent_of(url_path: &str) -> String {
    let trimmed = url_path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(slash) => format!("{}/", &trimmed[..slash]),
    }
}

/// Genera el listado HTML de un directorio sin index.html.
///
/// `url_path` es el path encodeado del request; `dir` el directorio ya
/// resuelto. Entradas en orden lexicográfico, dotfiles ocultos, `/` final
/// en los subdirectorios, y la entrada al padre siempre primera.
pub fn render_directory(url_path: &str, dir: &Path) -> String {
    let mut url_path = url_path.to_string();
    if !url_path.ends_with('/') {
        url_path.push('/');
    }

    // Si el directorio no se puede leer, el listado sale vacío (solo el
    // link al padre), igual que hacía siempre el servidor.
    let mut entries: Vec<(String, bool)> = Vec::new();
    if let Ok(dir_entries) = fs::read_dir(dir) {
        for entry in dir_entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let is_dir = entry.path().is_dir();
            entries.push((name, is_dir));
        }
    }
    entries.sort();

    let parent = parent_of(&url_path);
    let mut items = vec![format!(
        "<li><span>↰</span><a href=\"{}\">Parent directory</a></li>",
        encode_double_quoted_attribute(&parent)
    )];
    for (name, is_dir) in &entries {
        let suffix = if *is_dir { "/" } else { "" };
        let href = format!(
            "{}{}{}",
            url_path,
            utf8_percent_encode(name, HREF_ENCODE_SET),
            suffix
        );
        let label = format!("{}{}", name, suffix);
        items.push(format!(
            "<li><a href=\"{}\">{}</a></li>",
            encode_double_quoted_attribute(&href),
            encode_text(&label)
        ));
    }
    let list_html = items.join("\n        ");

    let title = encode_text(&url_path);
    format!(
        r#"<!doctype html>
<html lang="en"><head>
  <meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
  <title>Index of {title}</title>
  <style>{PAGE_CSS}</style>
</head>
<body>
  <header>
    <h1>Index of {title}</h1>
    <div class="badge">Directory listing</div>
  </header>
  <div class="wrap">
    <section class="card">
      <ul>
        {list_html}
      </ul>
    </section>
  </div>
  <footer>RedUnix Static File Server</footer>
</body></html>"#
    )
}

/// Recorre el árbol bajo el docroot y retorna el url path decodificado de
/// cada archivo: los de un directorio ordenados entre sí, y después sus
/// subdirectorios en orden. Dotfiles incluidos: la página raíz muestra el
/// árbol completo.
fn walk_files(docroot: &Path, dir: &Path, out: &mut Vec<String>) {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut subdirs: Vec<PathBuf> = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            // file_type() no sigue symlinks: un link a un directorio se
            // lista como archivo y el recorrido no puede ciclar.
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => subdirs.push(entry.path()),
                Ok(_) => files.push(entry.path()),
                Err(_) => {}
            }
        }
    }
    files.sort();
    subdirs.sort();

    for file in files {
        if let Ok(rel) = file.strip_prefix(docroot) {
            out.push(format!("/{}", rel.to_string_lossy()));
        }
    }
    for sub in subdirs {
        walk_files(docroot, &sub, out);
    }
}

/// Genera la página raíz: una fila por archivo del árbol con su contador
/// actual (0 si nunca se pidió) y la etiqueta de la variante en ejecución.
pub fn render_counter_page(docroot: &Path, counters: &CounterStore, label: &str) -> String {
    let mut urls = Vec::new();
    walk_files(docroot, docroot, &mut urls);

    // Un solo snapshot del store para toda la página
    let counts = counters.snapshot();

    let rows: Vec<String> = urls
        .iter()
        .map(|url| {
            let count = counts.get(url).copied().unwrap_or(0);
            let href = utf8_percent_encode(url, HREF_ENCODE_SET).to_string();
            format!(
                "<tr><td><a href=\"{}\">{}</a></td><td style=\"text-align:right\">{}</td></tr>",
                encode_double_quoted_attribute(&href),
                encode_text(url),
                count
            )
        })
        .collect();
    let table = if rows.is_empty() {
        "<tr><td colspan=\"2\">(empty)</td></tr>".to_string()
    } else {
        rows.join("\n      ")
    };

    let label = encode_text(label);
    format!(
        r#"<!doctype html>
<html lang="en"><head>
  <meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
  <title>RedUnix Static File Server</title>
  <style>{PAGE_CSS}</style>
</head>
<body>
  <header>
    <h1>RedUnix Static File Server</h1>
    <div class="badge">Open multiple tabs or run the load client to generate traffic</div>
  </header>
  <div class="wrap">
    <div class="card">
      <h2 style="margin:0 0 10px 0">Directory listing with per-file request counters</h2>
      <table>
      <tr><th>Path</th><th style="text-align:right">Requests Served</th></tr>
      {table}
      </table>
      <p style="margin-top:12px">Variant: <strong>{label}</strong></p>
    </div>
  </div>
  <footer>RedUnix Static File Server</footer>
</body></html>"#
    )
}
