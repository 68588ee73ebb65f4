mod web;

use axum::{http::header, routing::get, Router};

use crate::video_id::Platform;

/// Platform mirroring the default conventions on example hosts.
pub fn example_platform() -> Platform {
    Platform {
        canonical_hosts: vec!["example.com".to_string(), "www.example.com".to_string()],
        short_hosts: vec!["s.example".to_string()],
    }
}

pub const EXAMPLE_IMAGE_BASE: &str = "https://img.example.com/vi";

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Starts a local image host on its own runtime and returns its image base.
///
/// Only `abc123XYZ_-` has a maxres image; every other path answers 404,
/// like the real host does for videos without one.
pub fn spawn_image_host() -> String {
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async move {
            let app = Router::new().route(
                "/vi/abc123XYZ_-/maxresdefault.jpg",
                get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], png_bytes(8, 6)) }),
            );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();

            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}/vi", rx.recv().unwrap())
}
