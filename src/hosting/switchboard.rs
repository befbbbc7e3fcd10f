use crate::cards::Catalog;
use crate::gameroom::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Commands flowing from sessions into the switchboard.
#[derive(Debug)]
pub enum Command {
    /// A socket opened; its outbound JSON goes through this sender.
    Open(PlayerId, UnboundedSender<String>),
    /// A text frame arrived from the client.
    Frame(PlayerId, String),
    /// The socket closed or failed.
    Close(PlayerId),
}

/// The single writer for all room state. One task drains the command
/// inbox and serves each command to completion before the next, so deck
/// mutations never interleave and near-simultaneous plays are settled by
/// the turn check alone. Sessions only ever talk to it through channels.
pub struct Switchboard {
    gateway: Gateway,
    sessions: HashMap<PlayerId, UnboundedSender<String>>,
    inbox: UnboundedReceiver<Command>,
}

/// Cloneable endpoint sessions use to reach the switchboard.
#[derive(Clone)]
pub struct SwitchboardHandle {
    tx: UnboundedSender<Command>,
    count: Arc<AtomicU64>,
}

impl Switchboard {
    /// Spawns the switchboard task and returns the shared handle.
    pub fn spawn(catalog: Catalog) -> SwitchboardHandle {
        let (tx, rx) = unbounded_channel();
        let board = Self {
            gateway: Gateway::new(Arc::new(catalog)),
            sessions: HashMap::new(),
            inbox: rx,
        };
        tokio::spawn(board.run());
        SwitchboardHandle {
            tx,
            count: Arc::new(AtomicU64::new(1)),
        }
    }

    async fn run(mut self) {
        while let Some(command) = self.inbox.recv().await {
            self.serve(command);
        }
    }

    fn serve(&mut self, command: Command) {
        match command {
            Command::Open(id, tx) => {
                log::info!("{} connected", id);
                self.sessions.insert(id, tx);
            }
            Command::Frame(id, frame) => match Protocol::decode(&frame) {
                Ok(action) => {
                    let outbound = self.gateway.handle(id, action);
                    self.deliver(outbound);
                }
                Err(e) => log::warn!("{} sent {}", id, e),
            },
            Command::Close(id) => {
                log::info!("{} disconnected", id);
                let outbound = self.gateway.handle(id, Action::Disconnect);
                self.deliver(outbound);
                self.sessions.remove(&id);
            }
        }
    }

    fn deliver(&self, outbound: Vec<(PlayerId, Event)>) {
        for (recipient, event) in outbound {
            let json = Protocol::encode(&event).to_json();
            self.sessions
                .get(&recipient)
                .map(|tx| tx.send(json))
                .and_then(|res| res.err())
                .inspect(|e| log::warn!("failed delivery to {}: {:?}", recipient, e));
        }
    }
}

impl SwitchboardHandle {
    /// Registers a fresh connection: mints its identity and hands back
    /// the stream its notifications will arrive on.
    pub fn connect(&self) -> (PlayerId, UnboundedReceiver<String>) {
        let id = PlayerId::from(self.count.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = unbounded_channel();
        let _ = self.tx.send(Command::Open(id, tx));
        (id, rx)
    }
    /// Forwards a client frame; false once the switchboard is gone.
    pub fn frame(&self, id: PlayerId, frame: String) -> bool {
        self.tx.send(Command::Frame(id, frame)).is_ok()
    }
    /// Announces socket teardown.
    pub fn hangup(&self, id: PlayerId) {
        let _ = self.tx.send(Command::Close(id));
    }
}
