mod common;

use common::{Fixture, SAMPLE_JPG, SAMPLE_PNG, SAMPLE_TEXT};
use webroot::resource::{ResolveError, Resolver, Resource, content_type_for};

#[tokio::test]
async fn test_resolve_text_file() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/sample.txt").await.unwrap();

    assert_eq!(
        resource,
        Resource::File {
            bytes: SAMPLE_TEXT.to_vec(),
            content_type: "text/plain".to_string(),
        }
    );
}

#[tokio::test]
async fn test_resolve_png_file() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/images/sample_1.png").await.unwrap();

    assert_eq!(resource.content_type(), Some("image/png"));
    assert_eq!(resource.into_body(), Some(SAMPLE_PNG.to_vec()));
}

#[tokio::test]
async fn test_resolve_jpg_file() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/images/JPEG_example.jpg").await.unwrap();

    assert_eq!(resource.content_type(), Some("image/jpeg"));
    assert_eq!(resource.into_body(), Some(SAMPLE_JPG.to_vec()));
}

#[tokio::test]
async fn test_resolve_unknown_extension_falls_back() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let unknown = resolver.resolve("/images/diagram.unknownext").await.unwrap();
    let no_ext = resolver.resolve("/README").await.unwrap();

    assert_eq!(unknown.content_type(), Some("application/octet-stream"));
    assert_eq!(no_ext.content_type(), Some("application/octet-stream"));
}

#[tokio::test]
async fn test_resolve_directory_lists_children_sorted() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/images/").await.unwrap();

    assert_eq!(
        resource,
        Resource::Directory(vec![
            "JPEG_example.jpg".to_string(),
            "diagram.unknownext".to_string(),
            "sample_1.png".to_string(),
        ])
    );
    assert_eq!(resource.content_type(), Some("text/plain"));
    assert_eq!(
        resource.into_body(),
        Some(b"JPEG_example.jpg\r\ndiagram.unknownext\r\nsample_1.png".to_vec())
    );
}

#[tokio::test]
async fn test_resolve_root_directory_is_not_recursive() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/").await.unwrap();

    assert_eq!(
        resource,
        Resource::Directory(vec![
            "README".to_string(),
            "images".to_string(),
            "sample.txt".to_string(),
        ])
    );
}

#[tokio::test]
async fn test_resolve_missing() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    assert!(resolver.resolve("/nonexistent.exe").await.unwrap().is_missing());
    assert!(resolver.resolve("/images/nope/").await.unwrap().is_missing());
}

#[tokio::test]
async fn test_resolve_path_through_file_is_missing() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/sample.txt/more").await.unwrap();
    assert!(resource.is_missing());
}

#[tokio::test]
async fn test_resolve_strips_query_string() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/sample.txt?version=2").await.unwrap();
    assert_eq!(resource.into_body(), Some(SAMPLE_TEXT.to_vec()));
}

#[tokio::test]
async fn test_resolve_rejects_parent_traversal() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    assert!(resolver.resolve("/../secret.txt").await.unwrap().is_missing());
    assert!(resolver.resolve("/images/../../secret.txt").await.unwrap().is_missing());
    assert!(resolver.resolve("/..").await.unwrap().is_missing());
}

#[tokio::test]
async fn test_resolve_allows_dot_segments_inside_root() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let resource = resolver.resolve("/images/../sample.txt").await.unwrap();
    assert_eq!(resource.into_body(), Some(SAMPLE_TEXT.to_vec()));
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_rejects_symlink_out_of_root() {
    let fixture = Fixture::new();
    std::os::unix::fs::symlink(
        fixture.outer().join("secret.txt"),
        fixture.root().join("leak.txt"),
    )
    .unwrap();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    assert!(resolver.resolve("/leak.txt").await.unwrap().is_missing());
}

#[tokio::test]
async fn test_resolver_root_is_canonical() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root().join("images/..")).await.unwrap();

    assert_eq!(resolver.root(), fixture.root().canonicalize().unwrap());
}

#[tokio::test]
async fn test_resolver_missing_root() {
    let fixture = Fixture::new();
    let result = Resolver::new(fixture.root().join("absent")).await;

    assert!(matches!(result, Err(ResolveError::Root { .. })));
}

#[tokio::test]
async fn test_resolver_root_must_be_directory() {
    let fixture = Fixture::new();
    let result = Resolver::new(fixture.root().join("sample.txt")).await;

    assert!(matches!(result, Err(ResolveError::RootNotDirectory(_))));
}

#[test]
fn test_content_type_for_extensions() {
    use std::path::Path;

    assert_eq!(content_type_for(Path::new("a.txt")), "text/plain");
    assert_eq!(content_type_for(Path::new("a.png")), "image/png");
    assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
    assert_eq!(content_type_for(Path::new("a.html")), "text/html");
    assert_eq!(content_type_for(Path::new("a")), "application/octet-stream");
}

#[tokio::test]
async fn test_resolve_overlong_name_is_missing() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let target = format!("/{}", "a".repeat(300));
    assert!(resolver.resolve(&target).await.unwrap().is_missing());

    let target = format!("/images/{}.png", "b".repeat(300));
    assert!(resolver.resolve(&target).await.unwrap().is_missing());
}

#[tokio::test]
async fn test_resolve_overlong_path_is_missing() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    let target = format!("/{}", ["images"; 700].join("/"));
    assert!(resolver.resolve(&target).await.unwrap().is_missing());
}

#[tokio::test]
async fn test_resolve_nul_byte_is_missing() {
    let fixture = Fixture::new();
    let resolver = Resolver::new(fixture.root()).await.unwrap();

    assert!(resolver.resolve("/a\0b").await.unwrap().is_missing());
    assert!(resolver.resolve("/sample.txt\0.png").await.unwrap().is_missing());
}
