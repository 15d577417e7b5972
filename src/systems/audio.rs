//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`](crate::events::audio::AudioCmd) messages,
//!   emitting [`AudioMessage`](crate::events::audio::AudioMessage) responses.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's event
//!   receiver into Bevy ECS' message queue each frame.
//! - [`track_fx_playback`] keeps [`FxPlayback`] in sync with what the thread
//!   reports.
//!
//! Raylib audio API calls stay on a single thread; the main game thread
//! communicates via lock-free channels.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBridge, FxPlayback};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending events from the audio thread and enqueue them into the
/// ECS [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Bevy ECS' [`Messages`] API requires calling `update()` once per frame to
/// make messages written this frame visible to readers in the same frame.
/// Run this after [`poll_audio_messages`] in your schedule.
pub fn update_bevy_audio_messages(mut events: ResMut<Messages<AudioMessage>>) {
    events.update();
}

/// Apply audio thread reports to [`FxPlayback`].
pub fn track_fx_playback(mut reader: MessageReader<AudioMessage>, mut fx: ResMut<FxPlayback>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::FxLoaded { id } => fx.mark_loaded(id),
            AudioMessage::FxFinished { id } => fx.mark_finished(id),
            AudioMessage::FxUnloadedAll => fx.mark_all_unloaded(),
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("sound effect '{}' unavailable: {}", id, error);
                fx.mark_unloaded(id);
            }
        }
    }
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Owns every `Sound` handle, reacts to [`AudioCmd`] inputs and reports
/// [`AudioMessage`] outputs (loaded, failed, finished). Blocks until it
/// receives [`AudioCmd::Shutdown`]. If the audio device cannot be opened the
/// thread logs the failure and exits; commands sent afterwards are dropped.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("[audio] failed to initialize audio device: {}", e);
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut fx_playing: FxHashSet<String> = FxHashSet::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        warn!(
                            "[audio] fx load failed id='{}' path='{}' error='{}'",
                            id, path, e
                        );
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        debug!("[audio] fx play id='{}'", id);
                        sound.play();
                        fx_playing.insert(id);
                    } else {
                        warn!("[audio] fx play failed id='{}' reason='not loaded'", id);
                        let _ = tx_evt.send(AudioMessage::FxFinished { id });
                    }
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    sounds.clear();
                    fx_playing.clear();
                    let _ = tx_evt.send(AudioMessage::FxUnloadedAll);
                    break 'run;
                }
            }
        }

        // An id tracked as playing that Raylib no longer reports as playing
        // (or whose handle is gone) finishes exactly once.
        let fx_ended: Vec<String> = fx_playing
            .iter()
            .filter(|id| !sounds.get(*id).is_some_and(|sound| sound.is_playing()))
            .cloned()
            .collect();

        for id in fx_ended {
            debug!("[audio] fx finished id='{}'", id);
            fx_playing.remove(&id);
            let _ = tx_evt.send(AudioMessage::FxFinished { id });
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );

    // sounds drop before `audio`
    drop(sounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_message_releases_fx() {
        let mut world = World::new();
        world.insert_resource(Messages::<AudioMessage>::default());
        let mut fx = FxPlayback::new(true);
        fx.mark_loaded("coin");
        assert!(fx.play_once("coin"));
        world.insert_resource(fx);

        world
            .resource_mut::<Messages<AudioMessage>>()
            .write(AudioMessage::FxFinished { id: "coin".into() });

        let mut schedule = Schedule::default();
        schedule.add_systems(track_fx_playback);
        schedule.run(&mut world);

        assert!(!world.resource::<FxPlayback>().is_playing("coin"));
    }

    #[test]
    fn load_failure_makes_fx_unavailable() {
        let mut world = World::new();
        world.insert_resource(Messages::<AudioMessage>::default());
        world.insert_resource(FxPlayback::new(true));
        {
            let mut msgs = world.resource_mut::<Messages<AudioMessage>>();
            msgs.write(AudioMessage::FxLoaded { id: "death".into() });
            msgs.write(AudioMessage::FxLoadFailed {
                id: "coin".into(),
                error: "missing".into(),
            });
        }
        let mut schedule = Schedule::default();
        schedule.add_systems(track_fx_playback);
        schedule.run(&mut world);

        let mut fx = world.resource_mut::<FxPlayback>();
        assert!(fx.play_once("death"));
        assert!(!fx.play_once("coin"));
    }
}
