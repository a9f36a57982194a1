//! Chat signatures and the classifier that matches them.
//!
//! Matching is case-sensitive. Whole-line signatures live in a perfect-hash
//! table; the few anchored ones (prefix, `<name> ...` subject lines) are
//! tried afterwards in declaration order.

use phf::phf_map;

/// Semantic event produced by a recognised chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Maxor took the beam: crystals respawn
    CrystalsSpawning,
    /// Storm starts the pad cycle
    PadsActivated,
    /// Storm's death line (pads stop, Goldor start delay begins)
    StormDefeated,
    /// Storm got crushed by a pad
    StormCrushed,
    /// Goldor's opening line (barrier cycle starts)
    BarrierStarted,
    /// Core entrance opened (barrier cycle ends)
    CoreOpening,
    /// Somebody picked up an energy crystal
    CrystalPickedUp { player: String },
}

impl ChatEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::CrystalsSpawning => EventKind::CrystalsSpawning,
            Self::PadsActivated => EventKind::PadsActivated,
            Self::StormDefeated => EventKind::StormDefeated,
            Self::StormCrushed => EventKind::StormCrushed,
            Self::BarrierStarted => EventKind::BarrierStarted,
            Self::CoreOpening => EventKind::CoreOpening,
            Self::CrystalPickedUp { .. } => EventKind::CrystalPickedUp,
        }
    }
}

/// Payload-free tag for a [`ChatEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CrystalsSpawning,
    PadsActivated,
    StormDefeated,
    StormCrushed,
    BarrierStarted,
    CoreOpening,
    CrystalPickedUp,
}

/// Lines that must match exactly
static EXACT_LINES: phf::Map<&'static str, EventKind> = phf_map! {
    "[BOSS] Maxor: THAT BEAM! IT HURTS! IT HURTS!!" => EventKind::CrystalsSpawning,
    "[BOSS] Maxor: YOU TRICKED ME!" => EventKind::CrystalsSpawning,
    "[BOSS] Storm: Pathetic Maxor, just like expected." => EventKind::PadsActivated,
    "[BOSS] Storm: I should have known that I stood no chance." => EventKind::StormDefeated,
    "[BOSS] Storm: Ouch, that hurt!" => EventKind::StormCrushed,
    "[BOSS] Goldor: Who dares trespass into my domain?" => EventKind::BarrierStarted,
    "The Core entrance is opening!" => EventKind::CoreOpening,
};

/// Signatures anchored at one end of the line
#[derive(Debug, Clone, Copy)]
enum Anchored {
    /// Line starts with the text
    Prefix(&'static str, EventKind),
    /// `<name><suffix>` where name is one or more word characters
    Subject(&'static str, EventKind),
}

static ANCHORED: &[Anchored] = &[
    Anchored::Prefix("[BOSS] Storm: Oof", EventKind::StormCrushed),
    Anchored::Subject(" picked up an Energy Crystal!", EventKind::CrystalPickedUp),
];

/// Matches chat lines against the known signatures.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChatClassifier;

impl ChatClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one (already normalized) line. Unknown lines yield `None`.
    pub fn classify(&self, line: &str) -> Option<ChatEvent> {
        if let Some(kind) = EXACT_LINES.get(line) {
            return Some(simple_event(*kind));
        }

        ANCHORED.iter().find_map(|sig| match *sig {
            Anchored::Prefix(prefix, kind) => line.starts_with(prefix).then(|| simple_event(kind)),
            Anchored::Subject(suffix, kind) => {
                let subject = line.strip_suffix(suffix)?;
                if !is_word(subject) {
                    return None;
                }
                Some(match kind {
                    EventKind::CrystalPickedUp => ChatEvent::CrystalPickedUp {
                        player: subject.to_string(),
                    },
                    other => simple_event(other),
                })
            }
        })
    }
}

/// One or more ASCII word characters (letters, digits, underscore)
fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn simple_event(kind: EventKind) -> ChatEvent {
    match kind {
        EventKind::CrystalsSpawning => ChatEvent::CrystalsSpawning,
        EventKind::PadsActivated => ChatEvent::PadsActivated,
        EventKind::StormDefeated => ChatEvent::StormDefeated,
        EventKind::StormCrushed => ChatEvent::StormCrushed,
        EventKind::BarrierStarted => ChatEvent::BarrierStarted,
        EventKind::CoreOpening => ChatEvent::CoreOpening,
        // Subject lines always carry a name; an empty one never matches the local player.
        EventKind::CrystalPickedUp => ChatEvent::CrystalPickedUp {
            player: String::new(),
        },
    }
}
