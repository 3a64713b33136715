use crate::event::Event;
use crate::logger::{log, LogSeverity::*};
use crate::physics::Control;
use crate::protocol::{ClientPositionAndLook, InboundPacket};
use crate::session::client::Client;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

const CHANNEL_CAPACITY: usize = 256;

/// Input to a running session
#[derive(Debug)]
pub enum Command {
    Packet(InboundPacket),
    SetControl(Control, bool),
    ClearControls,
    Shutdown,
}

/// Channels to a session task. Awaiting `task` hands the client back once it ends.
#[derive(Debug)]
pub struct SessionHandle {
    pub commands: mpsc::Sender<Command>,
    pub outbound: mpsc::Receiver<ClientPositionAndLook>,
    pub events: mpsc::Receiver<Event>,
    pub task: JoinHandle<Client>,
}

/// Moves the client onto its own task. Packets, physics ticks and position updates
/// are serialised through one loop, so nothing else touches the world or the player.
pub fn spawn(client: Client) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let task = tokio::spawn(run(client, command_rx, outbound_tx, event_tx));

    SessionHandle {
        commands: command_tx,
        outbound: outbound_rx,
        events: event_rx,
        task,
    }
}

async fn run(
    mut client: Client,
    mut commands: mpsc::Receiver<Command>,
    outbound: mpsc::Sender<ClientPositionAndLook>,
    events: mpsc::Sender<Event>,
) -> Client {
    let mut physics_timer = interval(client.config().tick_interval());
    physics_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut send_timer = interval(client.config().position_update_interval());
    send_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    log("Session started".to_string(), Debug);

    loop {
        let mut replies = Vec::new();

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Packet(packet)) => {
                    // errors are logged and surfaced as events by the client
                    if let Ok(packets) = client.handle_packet(packet, Instant::now()) {
                        replies = packets;
                    }
                }
                Some(Command::SetControl(control, state)) => client.set_control(control, state),
                Some(Command::ClearControls) => client.clear_controls(),
                Some(Command::Shutdown) | None => break,
            },
            now = physics_timer.tick() => {
                let delta = now.saturating_duration_since(last_tick);
                last_tick = now;
                client.tick(delta.as_secs_f64());
            }
            now = send_timer.tick() => {
                replies.extend(client.position_update(now));
            }
        }

        for packet in replies {
            if outbound.send(packet).await.is_err() {
                log("Outbound channel closed".to_string(), Warning);
            }
        }
        for event in client.drain_events() {
            // a slow or absent listener loses events rather than stalling physics
            let _ = events.try_send(event);
        }
    }

    client.terminate();
    client
}
