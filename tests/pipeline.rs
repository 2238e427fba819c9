use std::collections::HashMap;

use product_scraper::{
    write_products, DetailPageFetcher, FlatListingFetcher, ProductSource, ScraperConfig,
    ScraperError, ScraperService, Strategy, Target,
};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::Service;
use url::Url;

const LISTING: &str = r#"
<html><body><div class="row">
  <div class="col-md-4"><div class="thumbnail">
    <h4 class="price">$10.00</h4>
    <h4><a href="/product/1" class="title" title="Widget">Widget</a></h4>
    <p class="description">Small widget</p>
    <div class="ratings">
      <p class="review-count">3 reviews</p>
      <p data-rating="5"></p>
    </div>
  </div></div>
  <div class="col-md-4"><div class="thumbnail">
    <h4 class="price">$25.50</h4>
    <h4><a href="/product/2" class="title" title="Gadget">Gadget</a></h4>
    <p class="description">Gadget, large</p>
    <div class="ratings">
      <p class="review-count">0 reviews</p>
      <p data-rating="1"></p>
    </div>
  </div></div>
</div></body></html>
"#;

const DETAIL: &str = r#"
<html><body><div class="thumbnail">
  <h4 class="price">$25.50</h4>
  <h4 class="title">Gadget</h4>
  <p class="description">Gadget, large</p>
  <div class="ratings">
    <p class="review-count">
      <span class="ws-icon ws-icon-star"></span>
      <span class="ws-icon ws-icon-star"></span>
      <span class="ws-icon ws-icon-star"></span>
      <span class="ws-icon ws-icon-star"></span>
      7 reviews
    </p>
  </div>
</div></body></html>
"#;

/// Serves fixed bodies by path; anything else is a 404.
async fn serve(routes: &[(&str, &str)]) -> Url {
    let routes: HashMap<String, String> = routes
        .iter()
        .map(|(path, body)| (path.to_string(), body.to_string()))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");

                let (status, body) = match routes.get(path) {
                    Some(body) => ("200 OK", body.as_str()),
                    None => ("404 Not Found", "not found"),
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Url::parse(&format!("http://{addr}/")).unwrap()
}

#[tokio::test]
async fn test_flat_listing_to_csv() {
    let base = serve(&[("/listing", LISTING)]).await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("home.csv");

    let fetcher = FlatListingFetcher::new(reqwest::Client::new()).unwrap();
    let products = fetcher.fetch(&base.join("listing").unwrap()).await.unwrap();
    write_products(&path, &products).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        [
            "title,description,price,rating,num_of_reviews",
            "Widget,Small widget,10.0,5,3",
            "Gadget,\"Gadget, large\",25.5,1,0",
        ]
    );
}

#[tokio::test]
async fn test_error_status_is_a_fetch_error() {
    let base = serve(&[]).await;
    let fetcher = FlatListingFetcher::new(reqwest::Client::new()).unwrap();

    let err = fetcher
        .fetch(&base.join("missing").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::Fetch(_)));
}

#[tokio::test]
async fn test_detail_page_counts_rating_indicators() {
    let base = serve(&[("/product/2", DETAIL)]).await;
    let fetcher = DetailPageFetcher::new(reqwest::Client::new(), base).unwrap();

    let product = fetcher.fetch("/product/2").await.unwrap();
    assert_eq!(product.title(), "Gadget");
    assert_eq!(product.description(), "Gadget, large");
    assert_eq!(product.price(), 25.5);
    assert_eq!(product.rating(), 4);
    assert_eq!(product.num_of_reviews(), 7);
}

#[tokio::test]
async fn test_one_detail_fetcher_serves_many_pages() {
    let widget = DETAIL
        .replace("<h4 class=\"title\">Gadget</h4>", "<h4 class=\"title\">Widget</h4>")
        .replace("$25.50", "$10.00");
    let base = serve(&[("/product/1", widget.as_str()), ("/product/2", DETAIL)]).await;
    let fetcher = DetailPageFetcher::new(reqwest::Client::new(), base).unwrap();

    let first = fetcher.fetch("/product/1").await.unwrap();
    let second = fetcher.fetch("/product/2").await.unwrap();

    assert_eq!((first.title(), first.price()), ("Widget", 10.0));
    assert_eq!((second.title(), second.price()), ("Gadget", 25.5));
    assert_eq!(first.rating(), second.rating());
}

#[tokio::test]
async fn test_service_writes_target_file() {
    let base = serve(&[("/listing", LISTING)]).await;
    let dir = TempDir::new().unwrap();
    let mut service = ScraperService::new(
        ScraperConfig::new()
            .with_base_url(base.as_str())
            .with_output_dir(dir.path()),
    )
    .unwrap();

    let target = Target {
        name: "phones",
        url: base.join("listing").unwrap(),
        strategy: Strategy::FlatListing,
    };
    let result = service.call(target).await.unwrap();

    assert_eq!(result.records, 2);
    assert_eq!(result.csv_path, dir.path().join("phones.csv"));
    assert_eq!(std::fs::read_to_string(&result.csv_path).unwrap().lines().count(), 3);
}

#[tokio::test]
async fn test_bad_tile_writes_nothing() {
    let broken = LISTING.replace(r#"<p class="description">Small widget</p>"#, "");
    let base = serve(&[("/listing", broken.as_str())]).await;
    let dir = TempDir::new().unwrap();
    let mut service = ScraperService::new(
        ScraperConfig::new()
            .with_base_url(base.as_str())
            .with_output_dir(dir.path()),
    )
    .unwrap();

    let target = Target {
        name: "home",
        url: base.join("listing").unwrap(),
        strategy: Strategy::FlatListing,
    };
    let err = service.call(target).await.unwrap_err();

    assert!(matches!(
        err,
        ScraperError::MissingField {
            field: "description",
            ..
        }
    ));
    assert!(!dir.path().join("home.csv").exists());
}
