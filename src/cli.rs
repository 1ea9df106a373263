//! Command-line arguments for the three binaries.
//!
//! Every path has a default so the tools run without arguments from a directory
//! that holds `generated_synthetic_data/`.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INSPECT_PATH: &str = "generated_synthetic_data/pointcloud_0000.npy";
pub const DEFAULT_XYZ_PATH: &str = "generated_synthetic_data/pointcloud_0006.npy";
pub const DEFAULT_RGBA_PATH: &str = "generated_synthetic_data/pointcloud_rgb_0006.npy";

/// Print the shape and first rows of a .npy point array
#[derive(Parser, Debug)]
#[command(name = "cloudpeek-inspect")]
#[command(version, about, long_about = None)]
pub struct InspectArgs {
    /// Path to the .npy file to inspect
    #[arg(default_value = DEFAULT_INSPECT_PATH)]
    pub path: PathBuf,
}

/// View an N×3 (XYZ) or N×6 (XYZ + 0-255 RGB) .npy point cloud
#[derive(Parser, Debug)]
#[command(name = "cloudpeek-view")]
#[command(version, about, long_about = None)]
pub struct ViewArgs {
    /// Path to the .npy point array
    #[arg(default_value = DEFAULT_XYZ_PATH)]
    pub path: PathBuf,

    /// Point radius in world units (defaults to a fraction of the scene size)
    #[arg(long)]
    pub point_size: Option<f32>,
}

/// View an N×3 position array colored by a separate N×4 (0-255 RGBA) array
#[derive(Parser, Debug)]
#[command(name = "cloudpeek-view-rgba")]
#[command(version, about, long_about = None)]
pub struct ViewRgbaArgs {
    /// Path to the .npy XYZ array
    #[arg(default_value = DEFAULT_XYZ_PATH)]
    pub xyz: PathBuf,

    /// Path to the .npy RGBA array
    #[arg(default_value = DEFAULT_RGBA_PATH)]
    pub rgba: PathBuf,

    /// Point radius in world units (defaults to a fraction of the scene size)
    #[arg(long)]
    pub point_size: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_commands_are_well_formed() {
        InspectArgs::command().debug_assert();
        ViewArgs::command().debug_assert();
        ViewRgbaArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let inspect = InspectArgs::try_parse_from(["cloudpeek-inspect"]).unwrap();
        assert_eq!(inspect.path, PathBuf::from(DEFAULT_INSPECT_PATH));

        let view = ViewArgs::try_parse_from(["cloudpeek-view"]).unwrap();
        assert_eq!(view.path, PathBuf::from(DEFAULT_XYZ_PATH));
        assert_eq!(view.point_size, None);

        let rgba = ViewRgbaArgs::try_parse_from(["cloudpeek-view-rgba"]).unwrap();
        assert_eq!(rgba.xyz, PathBuf::from(DEFAULT_XYZ_PATH));
        assert_eq!(rgba.rgba, PathBuf::from(DEFAULT_RGBA_PATH));
    }

    #[test]
    fn test_explicit_paths_and_point_size() {
        let rgba = ViewRgbaArgs::try_parse_from([
            "cloudpeek-view-rgba",
            "a.npy",
            "b.npy",
            "--point-size",
            "0.02",
        ])
        .unwrap();
        assert_eq!(rgba.xyz, PathBuf::from("a.npy"));
        assert_eq!(rgba.rgba, PathBuf::from("b.npy"));
        assert_eq!(rgba.point_size, Some(0.02));
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(InspectArgs::try_parse_from(["cloudpeek-inspect", "a.npy", "b.npy"]).is_err());
    }
}
