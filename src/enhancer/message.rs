#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::error::DbeError;

use super::{
    params::{CentreFrequency, HpfSelect, OperatingMode, Params},
    BassEnhancer,
};

/// Parameter change sent to the thread that owns a [`BassEnhancer`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    SetMode(OperatingMode),
    SetHpf(HpfSelect),
    SetEffectLevel(u8),
    SetCentreFrequency(CentreFrequency),
    SetVolume(Option<i16>),
    SetParams(Params),
}

impl ControlMessage {
    /// `params` with this change applied.
    pub fn apply_to(self, params: Params) -> Params {
        match self {
            ControlMessage::SetMode(mode) => params.with_mode(mode),
            ControlMessage::SetHpf(hpf) => params.with_hpf(hpf),
            ControlMessage::SetEffectLevel(db) => params.with_effect_level(db),
            ControlMessage::SetCentreFrequency(centre) => params.with_centre_frequency(centre),
            ControlMessage::SetVolume(db) => params.with_volume(db),
            ControlMessage::SetParams(new) => new,
        }
    }
}

pub trait ControlReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

impl BassEnhancer {
    /// Drain `rx`, applying every message in order.
    ///
    /// A rejected message does not stop the drain; the first error is
    /// returned once the queue is empty.
    pub fn apply_messages<R: ControlReceiver + ?Sized>(&mut self, rx: &mut R) -> Result<(), DbeError> {
        let mut first_error = None;
        while let Some(msg) = rx.pop() {
            if let Err(err) = self.set_params(msg.apply_to(self.params)) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
