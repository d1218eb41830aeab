//! A built tree served over a real socket.

use std::net::SocketAddr;

use axum::extract::Path;
use route_tree::{RouteTree, TreeConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

async fn start(app: axum::Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
            .unwrap();
    });

    (addr, tx)
}

#[tokio::test]
async fn test_tree_over_http() {
    let routes = RouteTree::build(TreeConfig::default(), |tree| {
        tree.get(|| {
            tree.on("hello", || {
                tree.is("", || async { "Hello!" }, &[])?;
                tree.is("{name}", |Path(name): Path<String>| async move { format!("Hello {name}!") }, &[])
            })
        })?;
        tree.on_handler(
            "static",
            axum::Router::new().fallback(|uri: axum::http::Uri| async move { uri.path().to_string() }),
        )
    })
    .unwrap();

    let (addr, shutdown) = start(routes.into_router()).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let base = format!("http://{addr}");

    let res = client.get(format!("{base}/hello/world")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Hello world!");

    let res = client.get(format!("{base}/hello")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "Hello!");

    let res = client.post(format!("{base}/hello")).send().await.unwrap();
    assert_eq!(res.status(), 405);

    let res = client.get(format!("{base}/static/css/site.css")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "/css/site.css");

    // Mounts forward every method, not only the ones declared in the tree.
    let res = client.delete(format!("{base}/static/cache")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let res = client.get(format!("{base}/missing")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let _ = shutdown.send(());
}
