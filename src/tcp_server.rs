use anyhow::Result;
use futures::{SinkExt, StreamExt};
use log::{debug, info, trace, warn};
use map_core::MapSession;
use tokio::net::TcpListener;
use tokio_util::codec::{Decoder, LinesCodec};

use crate::view_to_string::view_update_to_string;

/// Accepts viewers over TCP until something goes wrong.
///
/// Each connection sends hover input one command per line, and gets rendered view updates back.
pub async fn start_server(session: MapSession, addr: String) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on: {}", addr);

    let mut next_viewer_id = 0;
    loop {
        let (socket, peer) = listener.accept().await?;

        let viewer_id = next_viewer_id;
        next_viewer_id += 1;

        info!("Viewer {viewer_id} has connected from {peer}");

        let (input_sender, update_receiver) = session.add_viewer(format!("viewer {viewer_id}"));

        let (mut sink, mut stream) = LinesCodec::new().framed(socket).split::<String>();

        // spawn task for sending updates to the viewer
        tokio::spawn(async move {
            while let Ok(update) = update_receiver.recv_async().await {
                trace!("Got view update: {update:?}");
                let rendered = view_update_to_string(update);
                if let Err(e) = sink.send(rendered).await {
                    warn!("Failed to send update to viewer {viewer_id}: {e}");
                    break;
                }
            }
            debug!("Update sender for viewer {viewer_id} has been dropped");
        });

        // spawn task for receiving hover input from the viewer
        tokio::spawn(async move {
            // the stream will return None once the client disconnects
            while let Some(line) = stream.next().await {
                match line {
                    Ok(input) => {
                        debug!("Raw input: {input:?}");
                        if input == "quit" || input_sender.send(input).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!("Socket closed with error: {err:?}"),
                }
            }

            info!("Viewer {viewer_id} has disconnected");
        });
    }
}
