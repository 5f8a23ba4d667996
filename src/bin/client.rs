//! # Cliente de Carga
//! src/bin/client.rs
//!
//! Generador de carga para el servidor de archivos estáticos: reparte un
//! total de requests entre N threads, cada uno abre conexiones TCP crudas,
//! manda un GET mínimo y cuenta cuántas respuestas vienen con `200 OK`.
//!
//! Sirve para dos cosas: medir el contraste sequential vs threaded, y
//! disparar suficiente concurrencia real contra `--counters racy` para que
//! los incrementos perdidos sean visibles en la página raíz.
//!
//! ## Ejemplos de uso
//! ```bash
//! ./client --port 8080 --path /books/book1.txt
//! ./client --concurrency 100 --requests 2000 --json
//! ```

use clap::Parser;
use serde::Serialize;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

/// Argumentos del cliente de carga
#[derive(Debug, Clone, Parser)]
#[command(name = "client")]
#[command(about = "Cliente de carga concurrente para el servidor de archivos estáticos")]
#[command(version = "0.1.0")]
struct Args {
    /// Host del servidor
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Puerto del servidor
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Ruta a pedir en cada request
    #[arg(long, default_value = "/books/book1.txt")]
    path: String,

    /// Cantidad de threads que disparan requests en paralelo
    #[arg(long, default_value = "50")]
    concurrency: usize,

    /// Cantidad total de requests a repartir entre los threads
    #[arg(long, default_value = "500")]
    requests: usize,

    /// Emitir el reporte final como JSON en lugar de texto plano
    #[arg(long)]
    json: bool,
}

/// Reporte final de la corrida
#[derive(Debug, Serialize)]
struct Report {
    requests: usize,
    ok: usize,
    elapsed_secs: f64,
}

/// Hace un GET y retorna si la respuesta fue `200 OK`.
///
/// Una conexión nueva por request, igual que hace el servidor del otro
/// lado: mandar, leer hasta que el servidor cierre, mirar la status line.
/// Cualquier falla de red cuenta como "no OK", no como error fatal.
fn fetch(host: &str, port: u16, path: &str) -> std::io::Result<bool> {
    let mut stream = TcpStream::connect((host, port))?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.set_write_timeout(Some(Duration::from_secs(5)))?;

    let request = format!("GET {} HTTP/1.1\r\nHost: {}\r\n\r\n", path, host);
    stream.write_all(request.as_bytes())?;
    stream.shutdown(Shutdown::Write)?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;

    Ok(response.starts_with(b"HTTP/1.1 200 "))
}

/// Cuántos requests le tocan al worker `worker` de un total repartido
/// entre `concurrency` workers (el resto va a los primeros)
fn share_for(worker: usize, requests: usize, concurrency: usize) -> usize {
    let base = requests / concurrency;
    let extra = if worker < requests % concurrency { 1 } else { 0 };
    base + extra
}

fn main() {
    let args = Args::parse();

    // Con 0 threads no se reparte nada; un worker como mínimo
    let concurrency = args.concurrency.max(1);

    let start = Instant::now();

    let mut handles = Vec::with_capacity(concurrency);
    for worker in 0..concurrency {
        let share = share_for(worker, args.requests, concurrency);
        let host = args.host.clone();
        let path = args.path.clone();
        let port = args.port;

        handles.push(thread::spawn(move || {
            let mut ok = 0;
            for _ in 0..share {
                if let Ok(true) = fetch(&host, port, &path) {
                    ok += 1;
                }
            }
            ok
        }));
    }

    let ok: usize = handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or(0))
        .sum();

    let elapsed = start.elapsed().as_secs_f64();

    if args.json {
        let report = Report {
            requests: args.requests,
            ok,
            elapsed_secs: elapsed,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("💥 Error serializando el reporte: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "Done {} requests, {} OK, elapsed {:.3}s",
            args.requests, ok, elapsed
        );
    }
}
