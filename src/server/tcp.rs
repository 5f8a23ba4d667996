//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP de archivos estáticos en sus dos modos:
//! sequential (cada conexión se atiende inline en el thread del accept) y
//! threaded (cada conexión se procesa en su propio thread, sin límite de
//! threads vivos).
//!
//! El pipeline por conexión es siempre el mismo:
//! leer request → parsear → resolver ruta → responder contenido → escribir
//! bytes → cerrar. Cualquier falla de I/O en el medio se convierte en un
//! 500 de mejor esfuerzo en la frontera del handler, y el socket se cierra
//! exactamente una vez en todos los caminos.

use crate::config::{Config, CounterMode, ServerMode};
use crate::content;
use crate::counters::{CounterStore, IncrementStrategy};
use crate::http::{read_request_bytes, Request, Response, StatusCode};
use crate::resolver;
use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Servidor de archivos estáticos con contadores de requests por ruta
pub struct Server {
    config: Config,
    counters: CounterStore,
    docroot: Arc<PathBuf>,
    label: Arc<String>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Construye el servidor a partir de la configuración.
    ///
    /// Canonicaliza el docroot una sola vez (el resolver compara cada
    /// request contra esta forma canónica) y fija la estrategia de
    /// contadores para toda la vida del servidor. Falla si el docroot no
    /// se puede canonicalizar.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let docroot = Path::new(&config.docroot).canonicalize()?;

        let strategy = match config.counters {
            CounterMode::Locked => IncrementStrategy::Locked,
            CounterMode::Racy => IncrementStrategy::Racy {
                delay: Duration::from_micros(config.race_delay_us),
            },
        };
        let label = config.variant_label();

        Ok(Self {
            counters: CounterStore::new(strategy),
            docroot: Arc::new(docroot),
            label: Arc::new(label),
            listener: None,
            config,
        })
    }

    /// Handle del store de contadores compartido por todos los handlers.
    ///
    /// Cada instancia de servidor tiene su propio store: dos servidores en
    /// el mismo proceso (como en los tests) nunca se contaminan entre sí.
    pub fn counters(&self) -> CounterStore {
        self.counters.clone()
    }

    /// Hace bind al host:puerto configurado y retorna la dirección real.
    ///
    /// Con puerto 0 el SO elige uno efímero; la dirección retornada es la
    /// que los clientes tienen que usar (los tests dependen de esto).
    pub fn bind(&mut self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Corre el accept loop hasta que el proceso termine.
    ///
    /// Hace bind primero si nadie lo hizo. Un error al aceptar una conexión
    /// se loguea y el loop sigue; ninguna conexión individual puede tumbar
    /// al servidor.
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            println!("🚀 Iniciando servidor en {}", self.config.address());
            self.bind()?;
        }

        let listener = self.listener.as_ref().unwrap();
        if let Ok(addr) = listener.local_addr() {
            println!("📡 Escuchando en {} (docroot: {})", addr, self.docroot.display());
        }
        match self.config.mode {
            ServerMode::Threaded => println!("🧵 Modo threaded: un thread por conexión\n"),
            ServerMode::Sequential => println!("🧵 Modo sequential: una conexión a la vez\n"),
        }

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Entrega la conexión según el modo: thread nuevo o inline
    fn dispatch(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        match self.config.mode {
            ServerMode::Threaded => {
                println!("📥 Conexión desde {} (thread nuevo)", peer);

                let docroot = Arc::clone(&self.docroot);
                let counters = self.counters.clone();
                let label = Arc::clone(&self.label);

                thread::spawn(move || {
                    Self::handle_connection_static(stream, &docroot, &counters, &label);
                });
            }
            ServerMode::Sequential => {
                println!("📥 Conexión desde {}", peer);
                Self::handle_connection_static(stream, &self.docroot, &self.counters, &self.label);
            }
        }
    }

    /// Frontera exterior del handler: toda falla de I/O del pipeline se
    /// transforma en un 500 de mejor esfuerzo y el socket se cierra una
    /// sola vez, pase lo que pase adentro.
    fn handle_connection_static(
        mut stream: TcpStream,
        docroot: &Path,
        counters: &CounterStore,
        label: &str,
    ) {
        if let Err(e) = Self::try_handle(&mut stream, docroot, counters, label) {
            eprintln!(
                "   ❌ [{:?}] Error atendiendo la conexión: {}",
                thread::current().id(),
                e
            );
            // Mejor esfuerzo: si el socket sigue escribible, se avisa
            let _ = stream.write_all(&Self::internal_error_response(&e).to_bytes());
        }

        // Cierre único: shutdown explícito y el drop libera el descriptor
        let _ = stream.shutdown(Shutdown::Both);
    }

    /// Pipeline interno de la conexión: leer, decidir respuesta, escribir
    fn try_handle(
        stream: &mut TcpStream,
        docroot: &Path,
        counters: &CounterStore,
        label: &str,
    ) -> std::io::Result<()> {
        let start = Instant::now();

        let buffer = read_request_bytes(stream)?;
        let response = Self::response_for(&buffer, docroot, counters, label)?;

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let latency = start.elapsed();
        println!(
            "   ✅ [{:?}] {} ({:.2}ms)",
            thread::current().id(),
            response.status(),
            latency.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    /// Decide la respuesta para los bytes crudos de un request.
    ///
    /// Parse inválido → 400. Método distinto de GET → 405 con `Allow: GET`.
    /// Ruta que no resuelve (inexistente o fuera del docroot) → 404, sin
    /// distinguir los dos casos. El resto lo despacha el responder.
    fn response_for(
        buffer: &[u8],
        docroot: &Path,
        counters: &CounterStore,
        label: &str,
    ) -> std::io::Result<Response> {
        let thread_id = format!("{:?}", thread::current().id());

        let request = match Request::parse(buffer) {
            Ok(request) => request,
            Err(e) => {
                println!("   ⚠️ [{}] Request inválido: {}", thread_id, e);
                return Ok(Response::new(StatusCode::BadRequest));
            }
        };

        println!(
            "   [{}] {} {}",
            thread_id,
            request.method().as_str(),
            request.target()
        );

        if !request.is_get() {
            return Ok(Response::new(StatusCode::MethodNotAllowed).with_header("Allow", "GET"));
        }

        match resolver::resolve(request.target(), docroot) {
            Ok(location) => content::respond(&location, docroot, counters, label),
            // Escape del docroot e inexistente responden igual a propósito
            Err(_) => Ok(Response::new(StatusCode::NotFound)),
        }
    }

    /// Respuesta 500 de último recurso con un diagnóstico corto
    fn internal_error_response(fault: &std::io::Error) -> Response {
        Response::new(StatusCode::InternalServerError)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(&format!("Internal error: {}\n", fault))
    }
}
