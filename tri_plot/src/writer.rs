use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::figure::Figure;

#[derive(Debug, Error)]
pub enum WriterErrors {
    #[error("unsupported output format for {}, use svg or a bitmap extension such as png", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("output directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),
    #[error("image size must be positive, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    #[error("could not draw {}: {message}", .path.display())]
    Drawing { path: PathBuf, message: String },
    #[error("could not encode {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Bitmap,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, WriterErrors> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png" | "jpg" | "jpeg" | "bmp") => Ok(Self::Bitmap),
            _ => Err(WriterErrors::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Writes the figure to `path`, replacing any existing file.
///
/// The image is drawn and encoded in memory first, the file is only touched
/// once that succeeded.
pub fn save(figure: &Figure, path: &Path) -> Result<(), WriterErrors> {
    let format = OutputFormat::from_path(path)?;

    let (width, height) = (figure.style.width, figure.style.height);
    if width == 0 || height == 0 {
        return Err(WriterErrors::ZeroSize { width, height });
    }

    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        if !parent.is_dir() {
            return Err(WriterErrors::MissingDirectory(parent.to_path_buf()));
        }
    }

    let bytes = match format {
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                draw_into(figure, &root, path)?;
            }
            svg.into_bytes()
        }
        OutputFormat::Bitmap => {
            let mut buffer = vec![0u8; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
                draw_into(figure, &root, path)?;
            }
            encode(buffer, width, height, path)?
        }
    };

    fs::write(path, bytes).map_err(|source| WriterErrors::Io { path: path.to_path_buf(), source })?;

    info!("saved figure to {}", path.display());
    Ok(())
}

fn draw_into<DB: DrawingBackend>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
    path: &Path,
) -> Result<(), WriterErrors> {
    let drawing = |e: DrawingAreaErrorKind<DB::ErrorType>| WriterErrors::Drawing {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    figure
        .draw(root)
        .map_err(drawing)?;
    root.present()
        .map_err(drawing)
}

// rgb buffer to the encoded bytes of the format named by the extension
fn encode(buffer: Vec<u8>, width: u32, height: u32, path: &Path) -> Result<Vec<u8>, WriterErrors> {
    let failed = |message: String| WriterErrors::Encode { path: path.to_path_buf(), message };

    let format = ImageFormat::from_path(path).map_err(|e| failed(e.to_string()))?;
    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| failed("pixel buffer does not match the image size".to_string()))?;

    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .map_err(|e| failed(e.to_string()))?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Point, PointSet};
    use crate::style::PlotStyle;
    use plotters_backend::{BackendColor, BackendCoord, DrawingErrorKind};
    use std::fmt;
    use tempfile::tempdir;

    fn figure() -> Figure {
        let mut figure = Figure::new(PlotStyle::plain().with_size(120, 80));
        figure.scatter(&PointSet::from(vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0)]));
        figure.line(Point::new(0.0, 0.0), Point::new(1.0, 2.0));
        figure
    }

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "backend unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    // backend that refuses every operation
    struct BrokenBackend;

    impl DrawingBackend for BrokenBackend {
        type ErrorType = Unavailable;

        fn get_size(&self) -> (u32, u32) {
            (120, 80)
        }

        fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Unavailable>> {
            Err(DrawingErrorKind::DrawingError(Unavailable))
        }

        fn present(&mut self) -> Result<(), DrawingErrorKind<Unavailable>> {
            Err(DrawingErrorKind::DrawingError(Unavailable))
        }

        fn draw_pixel(
            &mut self,
            _point: BackendCoord,
            _color: BackendColor,
        ) -> Result<(), DrawingErrorKind<Unavailable>> {
            Err(DrawingErrorKind::DrawingError(Unavailable))
        }
    }

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::from_path(Path::new("tri.png")).unwrap(), OutputFormat::Bitmap);
        assert_eq!(OutputFormat::from_path(Path::new("a/tri.JPG")).unwrap(), OutputFormat::Bitmap);
        assert_eq!(OutputFormat::from_path(Path::new("tri.svg")).unwrap(), OutputFormat::Svg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("tri.pdf")),
            Err(WriterErrors::UnsupportedFormat(_))
        ));
        assert!(matches!(
            OutputFormat::from_path(Path::new("tri")),
            Err(WriterErrors::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_save_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tri.png");
        save(&figure(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_save_bmp_and_jpg() {
        let dir = tempdir().unwrap();

        let bmp = dir.path().join("tri.bmp");
        save(&figure(), &bmp).unwrap();
        assert_eq!(&fs::read(&bmp).unwrap()[..2], b"BM");

        let jpg = dir.path().join("tri.jpg");
        save(&figure(), &jpg).unwrap();
        assert_eq!(&fs::read(&jpg).unwrap()[..2], b"\xFF\xD8");
    }

    #[test]
    fn test_save_svg_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tri.svg");
        fs::write(&path, "stale").unwrap();

        save(&figure(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_save_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("tri.png");
        assert!(matches!(
            save(&figure(), &path),
            Err(WriterErrors::MissingDirectory(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_zero_size_writes_nothing() {
        let dir = tempdir().unwrap();
        for name in ["tri.png", "tri.svg"] {
            let path = dir.path().join(name);
            let mut flat = figure();
            flat.style = flat.style.with_size(0, 0);

            assert!(matches!(
                save(&flat, &path),
                Err(WriterErrors::ZeroSize { width: 0, height: 0 })
            ));
            assert!(!path.exists());

            flat.style = flat.style.with_size(120, 0);
            assert!(matches!(save(&flat, &path), Err(WriterErrors::ZeroSize { .. })));
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_drawing_failure_is_reported() {
        let root = BrokenBackend.into_drawing_area();
        let path = Path::new("broken.png");

        match draw_into(&figure(), &root, path) {
            Err(WriterErrors::Drawing { path: reported, message }) => {
                assert_eq!(reported, path);
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected a drawing error, got {other:?}"),
        }
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempdir().unwrap();
        // a directory sitting at the output path cannot be replaced by a file
        let path = dir.path().join("taken.png");
        fs::create_dir(&path).unwrap();

        assert!(matches!(save(&figure(), &path), Err(WriterErrors::Io { .. })));
        assert!(path.is_dir());
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let result = encode(vec![0u8; 10], 4, 4, Path::new("tri.png"));
        assert!(matches!(result, Err(WriterErrors::Encode { .. })));
    }
}
