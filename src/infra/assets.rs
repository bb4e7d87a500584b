//! Stylesheet and carousel script compiled into the binary.

use std::{io, path::Path as FsPath};

use axum::{
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, DirEntry, File, include_dir};

use crate::application::error::ErrorReport;

static PUBLIC: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static/public");

/// Location of the public assets, both as a URL prefix and under a build output directory.
pub const PUBLIC_ASSETS_PREFIX: &str = "static/public";

const CACHE_CONTROL: &str = "public, max-age=3600";

/// An embedded file and the content type it is served with.
#[derive(Debug, Clone, Copy)]
pub struct PublicAsset {
    pub path: &'static str,
    pub contents: &'static [u8],
    pub content_type: &'static str,
}

/// Look up `path` relative to the public bundle. Directory and traversal paths never match.
pub fn public_asset(path: &str) -> Option<PublicAsset> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.ends_with('/') || path.split('/').any(|part| part == "..") {
        return None;
    }

    PUBLIC.get_file(path).map(asset_for)
}

fn asset_for(file: &'static File<'static>) -> PublicAsset {
    let path = file.path().to_str().unwrap_or_default();
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    PublicAsset {
        path,
        contents: file.contents(),
        content_type,
    }
}

/// Every embedded asset, in bundle order.
pub fn public_assets() -> Vec<PublicAsset> {
    fn walk(dir: &'static Dir<'static>, out: &mut Vec<PublicAsset>) {
        for entry in dir.entries() {
            match entry {
                DirEntry::Dir(child) => walk(child, out),
                DirEntry::File(file) => out.push(asset_for(file)),
            }
        }
    }

    let mut assets = Vec::new();
    walk(&PUBLIC, &mut assets);
    assets
}

pub async fn serve_public(path: Option<Path<String>>) -> Response {
    let requested = path.map(|Path(value)| value).unwrap_or_default();
    let Some(asset) = public_asset(&requested) else {
        let mut response = StatusCode::NOT_FOUND.into_response();
        ErrorReport::from_message(
            "infra::assets::serve_public",
            format!("no public asset at `{requested}`"),
        )
        .attach(&mut response);
        return response;
    };

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(asset.content_type)),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        Bytes::from_static(asset.contents),
    )
        .into_response()
}

/// Copy every embedded asset under `dest`, returning the number of files written.
pub async fn write_public_assets(dest: &FsPath) -> io::Result<usize> {
    let assets = public_assets();
    for asset in &assets {
        let target = dest.join(asset.path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, asset.contents).await?;
    }
    Ok(assets.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_and_directory_paths_do_not_resolve() {
        for path in ["", "/", "../Cargo.toml", "nested/", "a/../site.css"] {
            assert!(public_asset(path).is_none(), "{path} resolved");
        }
    }

    #[test]
    fn carousel_script_is_embedded_as_javascript() {
        let asset = public_asset("/carousel.js").expect("embedded");
        assert_eq!(asset.path, "carousel.js");
        assert!(asset.content_type.ends_with("javascript"));
        assert!(!asset.contents.is_empty());
    }

    #[test]
    fn stylesheet_is_served_as_css() {
        let asset = public_asset("site.css").expect("embedded");
        assert_eq!(asset.content_type, "text/css");
    }

    #[tokio::test]
    async fn public_assets_are_written_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let written = write_public_assets(dir.path()).await.expect("writes");

        assert_eq!(written, public_assets().len());
        assert!(dir.path().join("carousel.js").is_file());
        assert!(dir.path().join("site.css").is_file());
    }
}
