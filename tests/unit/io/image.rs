//! Tests for PNG export of meshes, histograms and density grids

#[cfg(test)]
mod tests {
    use image::{Luma, Rgba};
    use inflatile::TilingError;
    use inflatile::analysis::histogram::{DensityGrid, Histogram};
    use inflatile::analysis::statistics::Statistic;
    use inflatile::catalog::{Mesh, MeshTile};
    use inflatile::io::image::{
        density_image_path, histogram_image_path, render_density, render_histogram, render_mesh,
        save, tiling_image_path,
    };
    use inflatile::spatial::point::Point;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn unit_square_mesh() -> Mesh {
        let outline = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        Mesh {
            name: "squares",
            steps: 0,
            tiles: vec![MeshTile {
                prototype: "square",
                outline: outline.clone(),
            }],
            vertices: outline,
        }
    }

    // Tests output names carry tiling, bins, steps and statistic
    // Verified by dropping the zero padding
    #[test]
    fn test_paths() {
        let dir = Path::new("output");
        assert_eq!(
            tiling_image_path(dir, "chair", 4),
            dir.join("chair-N.004-tiling.png")
        );
        assert_eq!(
            histogram_image_path(dir, "penrose", 250, 12, Statistic::SlopeGaps),
            dir.join("penrose-NUMBINS.000250-N.012-slopegaps.png")
        );
        assert_eq!(
            density_image_path(dir, "pinwheel", 3),
            dir.join("pinwheel-N.003-density.png")
        );
    }

    // Tests outlines are drawn inside the margin with y pointing up
    // Verified by drawing rows top-down in mesh coordinates
    #[test]
    fn test_render_mesh() {
        let image = render_mesh(&unit_square_mesh(), 64, 4).unwrap();
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(*image.get_pixel(0, 0), WHITE);
        assert_ne!(*image.get_pixel(4, 59), WHITE);
        assert_ne!(*image.get_pixel(59, 4), WHITE);
        assert_eq!(*image.get_pixel(32, 32), WHITE);
    }

    // Tests meshes that cannot be drawn are rejected
    // Verified by drawing an empty image instead
    #[test]
    fn test_render_mesh_invalid() {
        let empty = Mesh {
            name: "empty",
            steps: 0,
            tiles: Vec::new(),
            vertices: Vec::new(),
        };
        assert!(matches!(
            render_mesh(&empty, 64, 4),
            Err(TilingError::InvalidParameter { .. })
        ));
        assert!(render_mesh(&unit_square_mesh(), 64, 32).is_err());
    }

    // Tests bar heights scale to the tallest bin
    // Verified by scaling to the image height without normalizing
    #[test]
    fn test_render_histogram() {
        let histogram = Histogram::new(&[0.1, 0.6, 0.7], 2, (0.0, 1.0)).unwrap();
        let image = render_histogram(&histogram, 10, 10);
        assert_eq!(*image.get_pixel(7, 1), Rgba([70, 110, 180, 255]));
        assert_eq!(*image.get_pixel(2, 0), WHITE);
        assert_ne!(*image.get_pixel(2, 8), WHITE);
    }

    // Tests the fullest density cell is black
    // Verified by inverting the shading
    #[test]
    fn test_render_density() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.1, 0.1), Point::new(1.0, 1.0)];
        let grid = DensityGrid::from_points(&points, 2).unwrap();
        let image = render_density(&grid);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(*image.get_pixel(0, 1), Luma([0]));
        assert_eq!(*image.get_pixel(1, 1), Luma([255]));
    }

    // Tests saving creates missing directories
    // Verified by skipping directory creation
    #[test]
    fn test_save_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("tiles.png");
        let image = render_mesh(&unit_square_mesh(), 32, 2).unwrap();
        save(&image, &path).unwrap();
        assert!(path.exists());
    }

    // Tests directory and encoder failures map to distinct errors
    // Verified by reporting every failure as a file system error
    #[test]
    fn test_save_errors() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let image = render_mesh(&unit_square_mesh(), 32, 2).unwrap();

        let result = save(&image, &blocker.join("tiles.png"));
        assert!(matches!(result, Err(TilingError::FileSystem { .. })));

        let result = save(&image, &temp_dir.path().join("tiles.unknown"));
        assert!(matches!(result, Err(TilingError::ImageExport { .. })));
    }
}
