pub mod assets;
pub mod canvas;
pub mod certificate;

pub use assets::{AssetBase, AssetLoader};
pub use canvas::Canvas;
pub use certificate::{CertificateRenderer, RenderError, SignatureBlock};
