//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and message resources. Call
//! [`shutdown_audio`] during teardown to gracefully stop the thread and free
//! audio resources.
//!
//! [`FxPlayback`] mirrors which sound effects are currently audible so that
//! gameplay can avoid restarting an effect that is still playing.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashSet;

/// Shared bridge between the ECS world and the audio thread.
///
/// This resource is created by [`setup_audio`]. Systems can send commands via
/// [`AudioBridge::tx_cmd`] and poll for events via [`AudioBridge::rx_msg`].
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Register the message queues used by audio systems.
///
/// Always called, even with audio disabled, so that gameplay systems can
/// write [`AudioCmd`] unconditionally.
pub fn init_audio_messages(world: &mut World) {
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
}

/// Spawn the audio thread and register bridge resources.
///
/// This function:
/// - Creates command/event channels.
/// - Spawns the background thread running [`audio_thread`].
/// - Inserts [`AudioBridge`] and the audio message queues.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    init_audio_messages(world);
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for the
/// thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

/// Main-thread view of sound effect playback.
#[derive(Resource, Debug, Clone, Default)]
pub struct FxPlayback {
    /// When false, no effect is ever requested.
    pub enabled: bool,
    loaded: FxHashSet<String>,
    playing: FxHashSet<String>,
}

impl FxPlayback {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn mark_loaded(&mut self, id: &str) {
        self.loaded.insert(id.to_string());
    }

    pub fn mark_unloaded(&mut self, id: &str) {
        self.loaded.remove(id);
        self.playing.remove(id);
    }

    pub fn mark_all_unloaded(&mut self) {
        self.loaded.clear();
        self.playing.clear();
    }

    pub fn mark_finished(&mut self, id: &str) {
        self.playing.remove(id);
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.playing.contains(id)
    }

    /// Claim effect `id` for playback.
    ///
    /// Returns `true` when the caller should send [`AudioCmd::PlayFx`]: audio
    /// is enabled, the effect is loaded, and it is not already playing.
    pub fn play_once(&mut self, id: &str) -> bool {
        if !self.enabled || !self.loaded.contains(id) || self.playing.contains(id) {
            return false;
        }
        self.playing.insert(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_once_skips_while_playing() {
        let mut fx = FxPlayback::new(true);
        fx.mark_loaded("coin");
        assert!(fx.play_once("coin"));
        assert!(fx.is_playing("coin"));
        assert!(!fx.play_once("coin"));
        fx.mark_finished("coin");
        assert!(fx.play_once("coin"));
    }

    #[test]
    fn disabled_or_unloaded_never_plays() {
        let mut fx = FxPlayback::new(false);
        fx.mark_loaded("coin");
        assert!(!fx.play_once("coin"));

        let mut fx = FxPlayback::new(true);
        assert!(!fx.play_once("death"));
    }

    #[test]
    fn unload_all_forgets_everything() {
        let mut fx = FxPlayback::new(true);
        fx.mark_loaded("coin");
        fx.play_once("coin");
        fx.mark_all_unloaded();
        assert!(!fx.is_playing("coin"));
        assert!(!fx.play_once("coin"));
    }
}
