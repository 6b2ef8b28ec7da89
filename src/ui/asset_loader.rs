// Background image loading for brand cards
// Decodes logos and backgrounds off the main thread and hands textures back via a 16ms poll

use gdk4::Texture;
use gtk4::prelude::*;
use gtk4::{gdk, glib, Picture};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::image_loader::{decode_scaled, DecodedImage};
use crate::models::AssetSource;

const DECODE_THREADS: usize = 2;
const DECODE_QUEUE: usize = 256;
const TEXTURE_CACHE_ENTRIES: usize = 256;
/// Longest edge kept after decoding; cards never display larger.
const MAX_ASSET_EDGE: u32 = 1024;

// Neutral placeholder shown until the real image arrives (or forever, on failure)
fn placeholder_texture() -> &'static Texture {
    static PLACEHOLDER: OnceLock<Texture> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        let width = 16;
        let height = 16;
        let mut pixels = vec![0u8; width * height * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[0x24, 0x24, 0x2c, 0xff]);
        }
        let bytes = glib::Bytes::from_owned(pixels);
        gdk::MemoryTexture::new(
            width as i32,
            height as i32,
            gdk::MemoryFormat::R8g8b8a8,
            &bytes,
            width * 4,
        )
        .upcast()
    })
}

fn create_texture(image: DecodedImage) -> Option<Texture> {
    let DecodedImage {
        rgba,
        width,
        height,
    } = image;
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if width == 0 || height == 0 || rgba.len() < expected {
        return None;
    }
    let bytes = glib::Bytes::from_owned(rgba);
    let texture = gdk::MemoryTexture::new(
        width as i32,
        height as i32,
        gdk::MemoryFormat::R8g8b8a8,
        &bytes,
        (width * 4) as usize,
    );
    Some(texture.upcast())
}

#[derive(Debug)]
struct DecodeRequest {
    path: PathBuf,
}

#[derive(Debug)]
struct DecodeResult {
    path: PathBuf,
    image: Option<DecodedImage>,
}

struct LoaderState {
    pending_paths: HashSet<PathBuf>,
    waiters: HashMap<PathBuf, Vec<glib::WeakRef<Picture>>>,
    cache: lru::LruCache<PathBuf, Texture>,
}

struct AssetLoader {
    request_tx: flume::Sender<DecodeRequest>,
    result_rx: flume::Receiver<DecodeResult>,
    state: RefCell<LoaderState>,
}

thread_local! {
    static ASSET_LOADER: Rc<AssetLoader> = AssetLoader::new();
}

impl AssetLoader {
    fn new() -> Rc<Self> {
        let (request_tx, request_rx) = flume::bounded::<DecodeRequest>(DECODE_QUEUE);
        let (result_tx, result_rx) = flume::unbounded::<DecodeResult>();

        for _ in 0..DECODE_THREADS {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            std::thread::spawn(move || {
                while let Ok(req) = rx.recv() {
                    let image = match decode_scaled(&req.path, MAX_ASSET_EDGE) {
                        Ok(image) => Some(image),
                        Err(err) => {
                            warn!(path = ?req.path, error = ?err, "Failed to decode brand asset");
                            None
                        }
                    };
                    let _ = tx.send(DecodeResult {
                        path: req.path,
                        image,
                    });
                }
            });
        }

        let loader = Rc::new(Self {
            request_tx,
            result_rx,
            state: RefCell::new(LoaderState {
                pending_paths: HashSet::new(),
                waiters: HashMap::new(),
                cache: lru::LruCache::new(
                    NonZeroUsize::new(TEXTURE_CACHE_ENTRIES).unwrap_or(NonZeroUsize::MIN),
                ),
            }),
        });

        let loader_weak = Rc::downgrade(&loader);
        glib::timeout_add_local(Duration::from_millis(16), move || {
            if let Some(loader) = loader_weak.upgrade() {
                loader.process_results();
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });

        loader
    }

    fn request(&self, picture: &Picture, source: &AssetSource) {
        picture.set_paintable(Some(placeholder_texture()));

        let path = match source {
            AssetSource::Local(path) => path,
            AssetSource::Remote(url) => {
                debug!(%url, "Remote brand assets are not fetched");
                return;
            }
            AssetSource::Missing => return,
        };

        let mut state = self.state.borrow_mut();
        if let Some(texture) = state.cache.get(path) {
            picture.set_paintable(Some(texture));
            return;
        }

        state
            .waiters
            .entry(path.clone())
            .or_default()
            .push(picture.downgrade());

        if state.pending_paths.insert(path.clone())
            && self
                .request_tx
                .try_send(DecodeRequest { path: path.clone() })
                .is_err()
        {
            warn!(?path, "Asset decode queue full, keeping placeholder");
            state.pending_paths.remove(path);
            state.waiters.remove(path);
        }
    }

    fn process_results(&self) {
        while let Ok(result) = self.result_rx.try_recv() {
            let texture = result.image.and_then(create_texture);

            let waiters = {
                let mut state = self.state.borrow_mut();
                state.pending_paths.remove(&result.path);
                if let Some(ref texture) = texture {
                    state.cache.put(result.path.clone(), texture.clone());
                }
                state.waiters.remove(&result.path).unwrap_or_default()
            };

            let Some(texture) = texture else {
                continue;
            };
            trace!(path = ?result.path, waiters = waiters.len(), "Asset decoded");
            for waiter in waiters {
                if let Some(picture) = waiter.upgrade() {
                    picture.set_paintable(Some(&texture));
                }
            }
        }
    }
}

/// Shows `source` in `picture` once decoded, with a placeholder until then.
pub fn load_into(picture: &Picture, source: &AssetSource) {
    ASSET_LOADER.with(|loader| loader.request(picture, source));
}
