//! Tests for command-line parsing and the run driver

#[cfg(test)]
mod tests {
    use clap::Parser;
    use inflatile::TilingError;
    use inflatile::analysis::statistics::Statistic;
    use inflatile::io::cli::{Cli, TilingRunner};
    use inflatile::io::configuration::{
        BIN_SWEEP, DEFAULT_MAX_PAIRS, DEFAULT_MAX_TILES, DEFAULT_STEPS, DEFAULT_TILING,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("inflatile").chain(args.iter().copied()))
    }

    fn run_args(output: &Path, extra: &[&str]) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            output.display().to_string(),
            "-c".to_string(),
            output.join("missing.conf").display().to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(|s| (*s).to_string()));
        args
    }

    fn cli_owned(args: &[String]) -> Cli {
        let borrowed: Vec<&str> = args.iter().map(String::as_str).collect();
        cli(&borrowed)
    }

    // Tests defaults when no argument is given
    // Verified by changing default constants
    #[test]
    fn test_parse_defaults() {
        let parsed = cli(&[]);
        assert_eq!(parsed.tiling, DEFAULT_TILING);
        assert_eq!(parsed.steps, DEFAULT_STEPS);
        assert_eq!(parsed.max_tiles, DEFAULT_MAX_TILES);
        assert_eq!(parsed.max_pairs, DEFAULT_MAX_PAIRS);
        assert!(parsed.statistic.is_empty());
        assert!(parsed.should_show_progress());
        assert_eq!(parsed.statistics(), Statistic::ALL.to_vec());
        assert_eq!(parsed.bin_counts(), BIN_SWEEP.to_vec());
    }

    // Tests every flag is parsed
    // Verified by swapping two short flags
    #[test]
    fn test_parse_all_args() {
        let parsed = cli(&[
            "-t", "penrose", "-n", "4", "-s", "angles", "-s", "pc-edistsq", "-b", "20", "-b", "40",
            "-c", "ranges.conf", "-o", "out", "--no-image", "--density", "--max-tiles", "99", "-q",
            "-v", "--max-pairs", "77",
        ]);
        assert_eq!(parsed.tiling, "penrose");
        assert_eq!(parsed.steps, 4);
        assert_eq!(
            parsed.statistics(),
            vec![Statistic::Angles, Statistic::PairDistanceSquared]
        );
        assert_eq!(parsed.bin_counts(), vec![20, 40]);
        assert_eq!(parsed.config, PathBuf::from("ranges.conf"));
        assert_eq!(parsed.output, PathBuf::from("out"));
        assert!(parsed.no_image && parsed.density && parsed.verbose);
        assert_eq!(parsed.max_tiles, 99);
        assert_eq!(parsed.max_pairs, 77);
        assert!(!parsed.should_show_progress());
    }

    // Tests unknown statistic names are rejected by the parser
    // Verified by accepting free-form statistic names
    #[test]
    fn test_parse_rejects_unknown_statistic() {
        assert!(Cli::try_parse_from(["inflatile", "-s", "curvature"]).is_err());
    }

    // Tests the listing names every family
    // Verified by listing only the default tiling
    #[test]
    fn test_listing() {
        let listing = TilingRunner::listing();
        for name in ["squares", "chair", "fibonacci", "pinwheel", "ammann-a2", "penrose"] {
            assert!(listing.contains(name), "{name} missing from {listing}");
        }
        assert_eq!(listing.lines().count(), 6);
    }

    // Tests a full run writes the tiling and one histogram per statistic
    // Verified by skipping the tiling image
    #[test]
    fn test_run_writes_images() {
        let temp_dir = TempDir::new().unwrap();
        let args = run_args(temp_dir.path(), &["-t", "squares", "-n", "2", "-b", "10"]);
        let summary = TilingRunner::new(cli_owned(&args)).process().unwrap();

        assert_eq!(summary.tiles, 16);
        assert_eq!(summary.vertices, 25);
        assert_eq!(summary.histograms.len(), Statistic::ALL.len());
        assert_eq!(summary.images.len(), Statistic::ALL.len() + 1);
        for image in &summary.images {
            assert!(image.exists(), "{} not written", image.display());
        }
        assert!(temp_dir.path().join("squares-N.002-tiling.png").exists());
        assert!(
            temp_dir
                .path()
                .join("squares-NUMBINS.000010-N.002-angles.png")
                .exists()
        );
    }

    // Tests --no-image computes statistics without touching the disk
    // Verified by ignoring the flag for histograms
    #[test]
    fn test_run_no_image() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("never");
        let args = run_args(&output, &["-t", "chair", "-n", "1", "-b", "5", "-b", "7", "--no-image", "--density"]);
        let summary = TilingRunner::new(cli_owned(&args)).process().unwrap();

        assert_eq!(summary.tiles, 4);
        assert_eq!(summary.histograms.len(), Statistic::ALL.len() * 2);
        assert!(summary.images.is_empty());
        assert!(!output.exists());
    }

    // Tests configured ranges clip the binned values
    // Verified by binning over the data range regardless of the file
    #[test]
    fn test_run_uses_configured_range() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("plots.conf");
        fs::write(&config, "squares: 0,0.3; 0,4; -0.5,0.5; 0,10; -5,5; 0,10\n").unwrap();
        let parsed = cli(&[
            "-t",
            "squares",
            "-n",
            "2",
            "-s",
            "pc-edist",
            "-b",
            "4",
            "--no-image",
            "-q",
            "-c",
            config.to_str().unwrap(),
        ]);
        let summary = TilingRunner::new(parsed).process().unwrap();
        let (statistic, bins, binned) = summary.histograms[0];
        assert_eq!(statistic, Statistic::PairDistance);
        assert_eq!(bins, 4);
        // Only horizontal and vertical neighbours on the 5 × 5 lattice, both orders
        assert_eq!(binned, 80);
    }

    // Tests an unknown tiling name fails cleanly
    // Verified by falling back to the default tiling
    #[test]
    fn test_unknown_tiling() {
        let temp_dir = TempDir::new().unwrap();
        let args = run_args(temp_dir.path(), &["-t", "hexagons"]);
        let result = TilingRunner::new(cli_owned(&args)).process();
        assert!(matches!(result, Err(TilingError::UnknownTiling { name }) if name == "hexagons"));
    }

    // Tests a malformed range file aborts the run
    // Verified by skipping malformed lines
    #[test]
    fn test_bad_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("plots.conf");
        fs::write(&config, "squares 0,1\n").unwrap();
        let parsed = cli(&["-t", "squares", "--no-image", "-q", "-c", config.to_str().unwrap()]);
        let result = TilingRunner::new(parsed).process();
        assert!(matches!(result, Err(TilingError::Config { line: 1, .. })));
    }

    // Tests the tile budget is passed to the engine
    // Verified by using the default budget
    #[test]
    fn test_max_tiles_enforced() {
        let temp_dir = TempDir::new().unwrap();
        let args = run_args(temp_dir.path(), &["-t", "squares", "-n", "3", "--max-tiles", "10"]);
        let result = TilingRunner::new(cli_owned(&args)).process();
        assert!(matches!(result, Err(TilingError::ResourceExhausted { .. })));
    }

    // Tests the pair budget fails the run cleanly and names the generation
    // Verified by collecting pair distances without a budget
    #[test]
    fn test_max_pairs_enforced() {
        let temp_dir = TempDir::new().unwrap();
        let args = run_args(
            temp_dir.path(),
            &["-t", "squares", "-n", "2", "-s", "pc-edist", "--no-image", "--max-pairs", "100"],
        );
        match TilingRunner::new(cli_owned(&args)).process() {
            Err(TilingError::ResourceExhausted {
                step,
                resource,
                requested,
                limit,
            }) => {
                assert_eq!(step, 2);
                assert_eq!(resource, "pair distances");
                assert_eq!(requested, 25 * 24);
                assert_eq!(limit, 100);
            }
            other => panic!("expected ResourceExhausted, got {other:?}"),
        }

        let args = run_args(
            temp_dir.path(),
            &["-t", "squares", "-n", "2", "-s", "angles", "--no-image", "--max-pairs", "100"],
        );
        assert!(TilingRunner::new(cli_owned(&args)).process().is_ok());
    }
}
