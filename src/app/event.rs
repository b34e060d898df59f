use crate::bridge::error::LoadError;
use crate::bridge::SchemaResponse;
use crate::gdb::GlobalDataBindings;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Startup fetch of the game database finished
    GdbLoaded(Result<GlobalDataBindings, LoadError>),

    /// A schema fetch issued by the editor bridge finished
    SchemaLoaded(SchemaResponse),

    /// Tick for UI refresh
    Tick,
}
