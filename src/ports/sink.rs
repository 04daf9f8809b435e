use crate::strategy::{EngineState, Transition};

/// Receives every transition the engine fires: an order router, a signal
/// store, or just the log.
#[cfg_attr(test, mockall::automock)]
pub trait SignalSink {
    /// Called once per fired transition, after the engine state is updated
    fn publish(&mut self, transition: &Transition, state: &EngineState);
}

impl<S: SignalSink + ?Sized> SignalSink for Box<S> {
    fn publish(&mut self, transition: &Transition, state: &EngineState) {
        (**self).publish(transition, state)
    }
}
