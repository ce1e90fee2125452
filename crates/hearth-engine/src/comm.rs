//! Message-passing communicator for ranks that share no memory.
//!
//! A world of `size` ranks is built once with [`ChannelComm::world`]. Every
//! ordered pair of distinct ranks gets one unbounded channel per [`Tag`],
//! so a receive names both its source and its tag and messages on one
//! channel arrive in send order. Each sender is owned by exactly one rank:
//! when that rank's thread exits (normally or by panic) its endpoints drop
//! and every receive from it fails with [`CoordinationError::PeerLost`].
//!
//! ```text
//! rank 0 ──Control──▶ rank r      Round { phase, params } | Stop
//! rank 0 ──Field────▶ rank r      full current buffer
//! rank r ──Rows─────▶ rank 0      the rows rank r computed
//! rank r ◀─Reduce───▶ rank 0      local flag up, global flag down
//! ```
//!
//! The collectives ([`broadcast`], [`gather`], [`all_reduce_and`]) are
//! written against the [`Communicator`] trait, rooted at any rank.

use crossbeam_channel::{Receiver, Sender};

use hearth_core::{HeatParams, Phase};

use crate::error::CoordinationError;

// ── Messages ───────────────────────────────────────────────────────

/// Channel selector for a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Round orchestration.
    Control,
    /// Field broadcast.
    Field,
    /// Computed rows gathered back.
    Rows,
    /// Stability reduction.
    Reduce,
}

impl Tag {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Self::Control => 0,
            Self::Field => 1,
            Self::Rows => 2,
            Self::Reduce => 3,
        }
    }
}

/// A message between ranks. Every payload is owned.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Run `phase` with `params`.
    Round {
        /// Phase to run.
        phase: Phase,
        /// Parameters for the phase.
        params: HeatParams,
    },
    /// Exit the rank loop.
    Stop,
    /// Row-major copy of the current buffer.
    Field(Vec<f64>),
    /// Consecutive full rows starting at row `start`.
    Rows {
        /// First row index.
        start: usize,
        /// Row-major cell values; length is a multiple of the room size.
        values: Vec<f64>,
    },
    /// A stability flag.
    Flag(bool),
}

impl Message {
    /// The channel this message travels on.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Round { .. } | Self::Stop => Tag::Control,
            Self::Field(_) => Tag::Field,
            Self::Rows { .. } => Tag::Rows,
            Self::Flag(_) => Tag::Reduce,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Round { .. } => "Round",
            Self::Stop => "Stop",
            Self::Field(_) => "Field",
            Self::Rows { .. } => "Rows",
            Self::Flag(_) => "Flag",
        }
    }
}

// ── Communicator ───────────────────────────────────────────────────

/// Point-to-point messaging between ranks.
pub trait Communicator {
    /// This endpoint's rank.
    fn rank(&self) -> usize;

    /// Number of ranks in the world.
    fn size(&self) -> usize;

    /// Send `message` to rank `to` on the message's own tag.
    fn send(&self, to: usize, message: Message) -> Result<(), CoordinationError>;

    /// Block until a message arrives from rank `from` on `tag`.
    fn recv(&self, from: usize, tag: Tag) -> Result<Message, CoordinationError>;
}

/// [`Communicator`] backed by crossbeam channels.
#[derive(Debug)]
pub struct ChannelComm {
    rank: usize,
    size: usize,
    /// `outboxes[to][tag]`; `None` for this rank itself.
    outboxes: Vec<Option<Vec<Sender<Message>>>>,
    /// `inboxes[from][tag]`; `None` for this rank itself.
    inboxes: Vec<Option<Vec<Receiver<Message>>>>,
}

impl ChannelComm {
    /// Create the endpoints of a fully connected world of `size` ranks,
    /// indexed by rank.
    pub fn world(size: usize) -> Vec<ChannelComm> {
        let mut comms: Vec<ChannelComm> = (0..size)
            .map(|rank| ChannelComm {
                rank,
                size,
                outboxes: vec![None; size],
                inboxes: vec![None; size],
            })
            .collect();
        for from in 0..size {
            for to in 0..size {
                if from == to {
                    continue;
                }
                let (tx, rx): (Vec<_>, Vec<_>) = (0..Tag::COUNT)
                    .map(|_| crossbeam_channel::unbounded())
                    .unzip();
                comms[from].outboxes[to] = Some(tx);
                comms[to].inboxes[from] = Some(rx);
            }
        }
        comms
    }

    /// Drop every channel endpoint this rank holds.
    ///
    /// Peers blocked receiving from this rank wake with
    /// [`CoordinationError::PeerLost`]. Messages already sent stay
    /// deliverable.
    pub fn disconnect(&mut self) {
        self.outboxes.iter_mut().for_each(|o| *o = None);
        self.inboxes.iter_mut().for_each(|i| *i = None);
    }

    fn missing(&self, rank: usize) -> CoordinationError {
        if rank < self.size && rank != self.rank {
            CoordinationError::PeerLost { rank }
        } else {
            CoordinationError::UnknownPeer { rank }
        }
    }
}

impl Communicator for ChannelComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn send(&self, to: usize, message: Message) -> Result<(), CoordinationError> {
        let tag = message.tag();
        let tx = self
            .outboxes
            .get(to)
            .and_then(Option::as_ref)
            .ok_or_else(|| self.missing(to))?;
        tx[tag.index()]
            .send(message)
            .map_err(|_| CoordinationError::PeerLost { rank: to })
    }

    fn recv(&self, from: usize, tag: Tag) -> Result<Message, CoordinationError> {
        let rx = self
            .inboxes
            .get(from)
            .and_then(Option::as_ref)
            .ok_or_else(|| self.missing(from))?;
        rx[tag.index()]
            .recv()
            .map_err(|_| CoordinationError::PeerLost { rank: from })
    }
}

// ── Collectives ────────────────────────────────────────────────────

/// Deliver the root's message to every rank.
///
/// The root passes `Some(message)` and every other rank passes `None`;
/// all ranks return the root's message.
pub fn broadcast<C: Communicator + ?Sized>(
    comm: &C,
    root: usize,
    tag: Tag,
    message: Option<Message>,
) -> Result<Message, CoordinationError> {
    if comm.rank() == root {
        let message = message.ok_or_else(|| CoordinationError::MalformedMessage {
            from: root,
            reason: "broadcast root has nothing to send".into(),
        })?;
        for peer in (0..comm.size()).filter(|&r| r != root) {
            comm.send(peer, message.clone())?;
        }
        Ok(message)
    } else {
        let message = comm.recv(root, tag)?;
        if message.tag() != tag {
            return Err(unexpected(root, tag, &message));
        }
        Ok(message)
    }
}

/// Collect one message from every rank at the root.
///
/// The root gets `Some(messages)` indexed by rank, its own message
/// included; other ranks get `None`.
pub fn gather<C: Communicator + ?Sized>(
    comm: &C,
    root: usize,
    message: Message,
) -> Result<Option<Vec<Message>>, CoordinationError> {
    let tag = message.tag();
    if comm.rank() != root {
        comm.send(root, message)?;
        return Ok(None);
    }
    let mut own = Some(message);
    let mut gathered = Vec::with_capacity(comm.size());
    for peer in 0..comm.size() {
        if peer == root {
            gathered.extend(own.take());
            continue;
        }
        let m = comm.recv(peer, tag)?;
        if m.tag() != tag {
            return Err(unexpected(peer, tag, &m));
        }
        gathered.push(m);
    }
    Ok(Some(gathered))
}

/// Logical AND of every rank's `local` flag, returned to every rank.
///
/// Reduced at rank 0 and broadcast back.
pub fn all_reduce_and<C: Communicator + ?Sized>(
    comm: &C,
    local: bool,
) -> Result<bool, CoordinationError> {
    const ROOT: usize = 0;
    let reduced = match gather(comm, ROOT, Message::Flag(local))? {
        Some(flags) => {
            let mut all = true;
            for (rank, m) in flags.iter().enumerate() {
                match m {
                    Message::Flag(b) => all &= *b,
                    other => return Err(unexpected(rank, Tag::Reduce, other)),
                }
            }
            Some(Message::Flag(all))
        }
        None => None,
    };
    match broadcast(comm, ROOT, Tag::Reduce, reduced)? {
        Message::Flag(all) => Ok(all),
        other => Err(unexpected(ROOT, Tag::Reduce, &other)),
    }
}

pub(crate) fn unexpected(from: usize, tag: Tag, got: &Message) -> CoordinationError {
    CoordinationError::MalformedMessage {
        from,
        reason: format!("expected a {tag:?} message, got {}", got.kind()),
    }
}
