//! Messages exchanged with the audio thread.
//!
//! [`AudioCmd`] flows from ECS systems to the thread, [`AudioMessage`] flows
//! back. Both are ECS messages so systems use `MessageWriter`/`MessageReader`
//! and never touch the channels directly.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone)]
pub enum AudioCmd {
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    Shutdown,
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone)]
pub enum AudioMessage {
    FxLoaded { id: String },
    FxUnloadedAll,
    FxLoadFailed { id: String, error: String },
    FxFinished { id: String },
}
