use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;

/// WebSocket entry point. Accepts the upgrade, registers the connection
/// with the switchboard, and pumps frames both ways until either side
/// hangs up. The socket tearing down is what synthesizes the player's
/// disconnect; there is no reconnect or resume.
pub async fn play(
    board: web::Data<SwitchboardHandle>,
    req: HttpRequest,
    body: web::Payload,
) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            bridge(board.get_ref().clone(), session, stream);
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}

/// Spawns the pump for one connection: outbound JSON to the socket,
/// inbound text frames to the switchboard, teardown on close or error.
fn bridge(
    board: SwitchboardHandle,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    use futures::StreamExt;
    let (id, mut outbound) = board.connect();
    actix_web::rt::spawn(async move {
        'sesh: loop {
            tokio::select! {
                biased;
                msg = outbound.recv() => match msg {
                    Some(json) => if session.text(json).await.is_err() { break 'sesh },
                    None => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        if !board.frame(id, text.to_string()) { break 'sesh }
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        board.hangup(id);
        let _ = session.close(None).await;
    });
}
