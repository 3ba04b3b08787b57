use std::ffi::OsStr;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Mock HTTP endpoint driven by the binary-level tests.
///
/// Answers every connection with the configured status and a two-byte body.
/// When a connection limit is set, the listener closes once the limit is
/// reached and later connection attempts are refused.
pub struct MockEndpoint {
    pub url: String,
    served: Arc<AtomicUsize>,
    shutdown: mpsc::Sender<()>,
    accept_thread: Option<thread::JoinHandle<()>>,
}

impl MockEndpoint {
    /// Connections accepted so far.
    #[must_use]
    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        drop(self.shutdown.send(()));
        if let Some(handle) = self.accept_thread.take() {
            drop(handle.join());
        }
    }
}

/// Serve `200 OK` until the endpoint is dropped.
///
/// # Errors
///
/// Returns an error if the listener cannot be set up.
pub fn serve_ok() -> Result<MockEndpoint, String> {
    serve(200, None)
}

/// Serve `status`, optionally closing the listener after `connection_limit`
/// accepted connections.
///
/// # Errors
///
/// Returns an error if the listener cannot be set up.
pub fn serve(status: u16, connection_limit: Option<usize>) -> Result<MockEndpoint, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind mock endpoint failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("mock endpoint addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let served = Arc::new(AtomicUsize::new(0));
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let counter = Arc::clone(&served);
    let accept_thread = thread::spawn(move || {
        accept_connections(&listener, &shutdown_rx, &counter, connection_limit, status);
    });

    Ok(MockEndpoint {
        url: format!("http://{}", addr),
        served,
        shutdown: shutdown_tx,
        accept_thread: Some(accept_thread),
    })
}

fn accept_connections(
    listener: &TcpListener,
    shutdown: &mpsc::Receiver<()>,
    served: &AtomicUsize,
    connection_limit: Option<usize>,
    status: u16,
) {
    while shutdown.try_recv().is_err() {
        match listener.accept() {
            Ok((stream, _)) => {
                let count = served.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                thread::spawn(move || answer(stream, status));
                if connection_limit.is_some_and(|limit| count >= limit) {
                    return;
                }
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => thread::sleep(POLL_INTERVAL),
            Err(_) => return,
        }
    }
}

fn answer(mut stream: TcpStream, status: u16) {
    let mut request = [0u8; 1024];
    if stream.read(&mut request).is_err() {
        return;
    }
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status,
        reason_phrase(status)
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    drop(stream.flush());
    drop(stream.shutdown(Shutdown::Both));
}

const fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        503 => "Service Unavailable",
        _ => "Response",
    }
}

/// Run the compiled `volley` binary and capture its output.
///
/// # Errors
///
/// Returns an error if the binary path is missing or the process cannot be
/// spawned.
pub fn run_volley<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = option_env!("CARGO_BIN_EXE_volley")
        .ok_or_else(|| "CARGO_BIN_EXE_volley missing at compile time.".to_owned())?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run volley failed: {}", err))
}
