//! TSPLIB tour-file parser.
//!
//! Parsing is permissive the way LKH output requires: unknown headers are
//! ignored, `KEY: value` and `KEY = value` are both accepted, and the
//! `TOUR_SECTION` ends at `-1` or `EOF`.

use std::{fs, path::Path};

use crate::{LkhError, LkhResult};

const TOUR_SECTION_HEADER: &str = "TOUR_SECTION";
const TOUR_END_MARKER: &str = "-1";
const EOF_MARKER: &str = "EOF";
const TSPLIB_NODE_ID_BASE: usize = 1;

/// Parsed `.tour` file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TsplibTour {
    pub name: Option<String>,
    pub comment_lines: Vec<String>,
    pub dimension: Option<usize>,
    /// `OPTIMUM` header written by LKH.
    pub optimum: Option<f64>,
    /// Node ids exactly as stored in the file (1-based).
    pub tour_section: Vec<usize>,
}

impl TsplibTour {
    pub fn from_file(path: &Path) -> LkhResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> LkhResult<Self> {
        let mut tour = Self::default();
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let mut saw_section = false;
        for line in lines.by_ref() {
            if line.eq_ignore_ascii_case(EOF_MARKER) {
                break;
            }
            if line.eq_ignore_ascii_case(TOUR_SECTION_HEADER) {
                saw_section = true;
                break;
            }
            tour.read_header(line)?;
        }

        if !saw_section {
            return Err(LkhError::invalid_data("Missing TOUR_SECTION"));
        }

        'section: for line in lines {
            for token in line.split_whitespace() {
                if token == TOUR_END_MARKER || token.eq_ignore_ascii_case(EOF_MARKER) {
                    break 'section;
                }
                let id: i64 = token.parse().map_err(|e| {
                    LkhError::invalid_data(format!("Bad tour token '{token}': {e}"))
                })?;
                let id = usize::try_from(id)
                    .ok()
                    .filter(|id| *id >= TSPLIB_NODE_ID_BASE)
                    .ok_or_else(|| {
                        LkhError::invalid_data(format!(
                            "Bad node id {id}; TSPLIB ids must be >= {TSPLIB_NODE_ID_BASE}"
                        ))
                    })?;
                tour.tour_section.push(id);
            }
        }

        if let Some(dimension) = tour.dimension
            && dimension != tour.tour_section.len()
        {
            return Err(LkhError::invalid_data(format!(
                "DIMENSION is {dimension}, but TOUR_SECTION has {} nodes",
                tour.tour_section.len()
            )));
        }

        Ok(tour)
    }

    /// Node ids shifted from TSPLIB's 1-based numbering to 0-based.
    ///
    /// Parsing rejects id `0`, so the shift cannot underflow.
    pub fn zero_based_tour(&self) -> Vec<usize> {
        self.tour_section
            .iter()
            .map(|id| id - TSPLIB_NODE_ID_BASE)
            .collect()
    }

    fn read_header(&mut self, line: &str) -> LkhResult<()> {
        let Some((key, value)) = line.split_once(':').or_else(|| line.split_once('=')) else {
            return Ok(());
        };
        let value = value.trim();

        match key.trim().to_ascii_uppercase().as_str() {
            "NAME" => self.name = Some(value.to_string()),
            "COMMENT" => self.comment_lines.push(value.to_string()),
            "TYPE" if !value.eq_ignore_ascii_case("TOUR") => {
                return Err(LkhError::invalid_data(format!(
                    "Unsupported tour TYPE '{value}'"
                )));
            }
            "DIMENSION" => {
                let parsed = value.parse::<usize>().map_err(|e| {
                    LkhError::invalid_data(format!("Bad DIMENSION value '{value}': {e}"))
                })?;
                self.dimension = Some(parsed);
            }
            "OPTIMUM" => {
                let parsed = value.parse::<f64>().map_err(|e| {
                    LkhError::invalid_data(format!("Bad OPTIMUM value '{value}': {e}"))
                })?;
                self.optimum = Some(parsed);
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::TsplibTour;

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("lkh-tests-{name}-{nanos}"))
    }

    #[test]
    fn parses_lkh_output_headers_and_section() {
        let text = r#"
NAME : problem.42.tour
OPTIMUM = 42
COMMENT : Length = 42
COMMENT : Found by LKH-3
TYPE : TOUR
DIMENSION : 4
TOUR_SECTION
1
3
2
4
-1
EOF
"#;

        let tour = TsplibTour::from_text(text).expect("parse tour");
        assert_eq!(tour.name.as_deref(), Some("problem.42.tour"));
        assert_eq!(tour.comment_lines.len(), 2);
        assert_eq!(tour.dimension, Some(4));
        assert_eq!(tour.optimum, Some(42.0));
        assert_eq!(tour.tour_section, vec![1, 3, 2, 4]);
        assert_eq!(tour.zero_based_tour(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn reads_tour_file_from_disk() {
        let dir = unique_temp_dir("tour-file");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("run.tour");
        fs::write(&path, "TOUR_SECTION\n2 1 3\n-1\nEOF\n").expect("write tour");

        let tour = TsplibTour::from_file(&path).expect("parse tour");
        assert_eq!(tour.zero_based_tour(), vec![1, 0, 2]);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn missing_section_is_rejected() {
        let err = TsplibTour::from_text("NAME: x\nEOF\n").expect_err("no section");
        assert!(err.to_string().contains("Missing TOUR_SECTION"));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let err = TsplibTour::from_text("DIMENSION: 3\nTOUR_SECTION\n1\n2\n-1\n")
            .expect_err("short tour");
        assert!(err.to_string().contains("DIMENSION is 3"));
    }

    #[test]
    fn zero_node_id_is_rejected() {
        let err = TsplibTour::from_text("TOUR_SECTION\n0\n1\n-1\n").expect_err("zero id");
        assert!(err.to_string().contains("Bad node id 0"));
    }

    #[test]
    fn foreign_type_is_rejected() {
        let err = TsplibTour::from_text("TYPE: TSP\nTOUR_SECTION\n1\n-1\n").expect_err("type");
        assert!(err.to_string().contains("Unsupported tour TYPE 'TSP'"));
    }
}
