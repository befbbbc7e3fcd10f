use super::*;
use crate::cards::Catalog;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;

/// Listen address when BIND_ADDR is unset.
const BIND_ADDR: &str = "0.0.0.0:3000";

pub struct Server;

impl Server {
    /// Boots the switchboard and serves the WebSocket endpoint until
    /// shutdown. The catalog is loaded once; rooms deal from it read-only.
    pub async fn run(catalog: Catalog) -> Result<(), std::io::Error> {
        let board = web::Data::new(Switchboard::spawn(catalog));
        let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| BIND_ADDR.to_string());
        log::info!("hosting duels on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(board.clone())
                .route("/play", web::get().to(play))
        })
        .workers(4)
        .bind(addr)?
        .run()
        .await
    }
}
