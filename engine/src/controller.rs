//! Running the game for a set of presentation clients.
//!
//! The controller thread owns the game state. Clients get immutable
//! snapshots over rendezvous channels and feed commands into a single shared
//! input queue, so every client sees the same sequence of states and every
//! command is applied in one total order.

use std::{
    fmt,
    sync::{
        mpsc::{self, Receiver, Sender, SyncSender},
        Arc,
    },
};

use crate::prelude::*;

/// Game state as seen by clients after a tick.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Ticks run so far.
    pub turn: u64,
    pub level_name: String,
    pub level: Level,
    pub player: Player,
    pub last_event: Option<GameEvent>,
    pub status: Status,
}

impl Runtime {
    pub fn snapshot(&self) -> Snapshot {
        let level = self.level().clone();
        Snapshot {
            turn: self.turn(),
            level_name: level.name().to_owned(),
            last_event: level.last_event(),
            level,
            player: self.player().clone(),
            status: self.status(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ClientId(usize);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client {}", self.0)
    }
}

/// Input tagged with the client that sent it.
#[derive(Copy, Clone, Debug)]
struct Command {
    client: ClientId,
    input: Input,
}

/// Client end of the controller connection.
pub struct Client {
    id: ClientId,
    snapshots: Receiver<Arc<Snapshot>>,
    input: Sender<Command>,
}

impl Client {
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the controller has stopped or detached this
    /// client.
    pub fn recv(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.recv().ok()
    }

    /// Take a snapshot if the controller is offering one right now.
    pub fn try_recv(&self) -> Option<Arc<Snapshot>> {
        self.snapshots.try_recv().ok()
    }

    /// Queue a command. Returns false if the controller is gone.
    pub fn send(&self, input: Input) -> bool {
        self.input
            .send(Command {
                client: self.id,
                input,
            })
            .is_ok()
    }

    /// Detach from the game.
    pub fn close(self) {
        self.send(Input::CloseClient);
    }
}

pub struct Controller {
    runtime: Runtime,
    sender: Sender<Command>,
    inbox: Receiver<Command>,
    /// Attached clients in attach order.
    clients: Vec<(ClientId, SyncSender<Arc<Snapshot>>)>,
    next_id: usize,
}

impl Controller {
    pub fn new(runtime: Runtime) -> Self {
        let (sender, inbox) = mpsc::channel();
        Controller {
            runtime,
            sender,
            inbox,
            clients: Vec::new(),
            next_id: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Connect a new client. Must be called before `run`.
    pub fn attach(&mut self) -> Client {
        let id = ClientId(self.next_id);
        self.next_id += 1;

        // Zero capacity, a broadcast completes only when every client has
        // taken its snapshot.
        let (send, snapshots) = mpsc::sync_channel(0);
        self.clients.push((id, send));
        log::info!("{id} attached");

        Client {
            id,
            snapshots,
            input: self.sender.clone(),
        }
    }

    /// Run the game until it ends, a client quits or every client has left.
    pub fn run(self) -> Status {
        let Controller {
            mut runtime,
            sender,
            inbox,
            mut clients,
            ..
        } = self;
        // Only clients can keep the input queue alive from here on.
        drop(sender);

        loop {
            broadcast(&mut clients, &runtime);

            if runtime.status() != Status::Ongoing {
                log::info!("game over on turn {}", runtime.turn());
                break;
            }
            if clients.is_empty() {
                log::info!("no clients left");
                break;
            }

            let Some(Command { client, input }) =
                next_command(&inbox, &clients)
            else {
                log::info!("input queue closed");
                break;
            };

            match input {
                Input::Quit => {
                    log::info!("{client} quit the game");
                    break;
                }
                Input::CloseClient => {
                    clients.retain(|(id, _)| *id != client);
                    log::info!("{client} detached");
                }
                _ => {}
            }

            runtime.tick(input);
        }

        runtime.status()
    }
}

/// Send the current state to every client. Clients that have hung up are
/// detached.
fn broadcast(
    clients: &mut Vec<(ClientId, SyncSender<Arc<Snapshot>>)>,
    runtime: &Runtime,
) {
    let snapshot = Arc::new(runtime.snapshot());
    clients.retain(|(id, send)| {
        if send.send(snapshot.clone()).is_err() {
            log::warn!("{id} hung up, detaching");
            false
        } else {
            true
        }
    });
}

/// Wait for the next command from an attached client.
fn next_command(
    inbox: &Receiver<Command>,
    clients: &[(ClientId, SyncSender<Arc<Snapshot>>)],
) -> Option<Command> {
    loop {
        let cmd = inbox.recv().ok()?;
        if clients.iter().any(|(id, _)| *id == cmd.client) {
            return Some(cmd);
        }
        if cmd.input != Input::CloseClient {
            log::warn!("ignoring {:?} from {}", cmd.input, cmd.client);
        }
    }
}
