//! Minimal hosted player: registers every handler, then advances position
//! once a second while "playing". Drive it with any MPRIS controller, e.g.
//! `playerctl -p <name> play-pause`.

use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mpris_host::{Field, LoopStatus, MetadataValue, MprisService, PlaybackStatus, Server};

#[derive(Parser)]
#[command(about = "Serve a demo MPRIS player on the session bus")]
struct Args {
    /// Player name; the service registers as org.mpris.MediaPlayer2.<name>
    #[arg(default_value = "player-demo")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut server = Server::new();

    let player = server.player_mut();
    player.set_identity("A generic player");
    player.set_supported_uri_schemes(vec!["file".to_owned()]);
    player.set_supported_mime_types(vec![
        "application/octet-stream".to_owned(),
        "text/plain".to_owned(),
    ]);
    player.set_minimum_rate(0.1);
    player.set_maximum_rate(2.0);
    player.set_metadata(HashMap::from([
        (Field::TrackId, MetadataValue::ObjectPath("/1".to_owned())),
        (Field::Album, MetadataValue::from("an album")),
        (Field::Title, MetadataValue::from("best song ever")),
        (Field::Artist, MetadataValue::from(vec!["idk".to_owned()])),
        (Field::Length, MetadataValue::from(1_000_000_000_i64)),
    ]));

    server
        .controls_mut()
        .on_quit(|_| std::process::exit(0))
        .on_raise(|_| info!("nothing to raise"))
        .on_next(|p| info!(position = p.state().position(), "next"))
        .on_previous(|p| info!(position = p.state().position(), "previous"))
        .on_play(|p| p.set_playback_status(PlaybackStatus::Playing))
        .on_pause(|p| p.set_playback_status(PlaybackStatus::Paused))
        .on_play_pause(|p| {
            let next = match p.state().playback_status() {
                PlaybackStatus::Playing => PlaybackStatus::Paused,
                _ => PlaybackStatus::Playing,
            };
            p.set_playback_status(next);
        })
        .on_stop(|p| {
            p.set_playback_status(PlaybackStatus::Stopped);
            p.set_position(0);
        })
        .on_seek(|p, offset| {
            let position = p.state().position().saturating_add(offset);
            p.set_position(position);
            p.seeked(position);
        })
        .on_set_position(|p, _track_id, position| {
            p.set_position(position);
            p.seeked(position);
        })
        .on_open_uri(|_, uri| info!(uri, "not opening uri, sorry"))
        .on_fullscreen_changed(|_, value| info!(value, "fullscreen changed"))
        .on_loop_status_changed(|_, status: LoopStatus| info!(%status, "loop status changed"))
        .on_rate_changed(|_, rate| info!(rate, "rate changed"))
        .on_shuffle_changed(|_, value| info!(value, "shuffle changed"))
        .on_volume_changed(|_, volume| info!(volume, "volume changed"));

    let service = MprisService::start(server, &args.name).await?;
    info!(name = %args.name, "serving on the session bus");

    let mut tick = tokio::time::interval(Duration::from_secs(1));
    loop {
        tick.tick().await;

        service
            .update(|server| {
                let player = server.player_mut();
                if player.state().playback_status() == PlaybackStatus::Playing {
                    let position = player.state().position() + 1_000_000;
                    player.set_position(position);
                    info!(position, "playing");
                } else {
                    info!("paused (or stopped)");
                }
            })
            .await;
    }
}
