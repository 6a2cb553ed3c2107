//! Session driver
//!
//! One tokio task owns the [`SequenceNavigator`] for the whole interactive
//! phase. The REPL and the tick scheduler only send [`Request`]s, so the
//! navigation and timer state is never touched from two places at once.

use crate::app_state::ManagerConfig;
use crate::commands;
use crate::sequence::{Command, SequenceNavigator};
use crate::surface::{RenderSurface, TerminalSurface};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

#[derive(Debug)]
pub enum Request {
    Engine(Command),
    Status,
    ShowOrder,
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        Request::Engine(command)
    }
}

pub type RequestSender = UnboundedSender<Request>;

/// Start the driver with a terminal surface. Returns the request channel and
/// the task handle; abort the handle to end the session.
pub fn spawn(navigator: SequenceNavigator, config: &ManagerConfig) -> (RequestSender, JoinHandle<SequenceNavigator>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let surface = TerminalSurface::new(config, tx.clone());
    let handle = tokio::spawn(run(navigator, surface, rx));
    (tx, handle)
}

/// Consume requests until every sender is dropped, then hand the navigator back.
pub async fn run<S: RenderSurface>(
    mut navigator: SequenceNavigator,
    mut surface: S,
    mut requests: UnboundedReceiver<Request>,
) -> SequenceNavigator {
    while let Some(request) = requests.recv().await {
        match request {
            Request::Engine(command) => navigator.dispatch(command, &mut surface),
            Request::Status => commands::show_status(&navigator),
            Request::ShowOrder => commands::show_order(&navigator),
        }
    }
    tracing::debug!("request channel closed, driver stopping");
    navigator
}
