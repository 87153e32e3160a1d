use crate::error::LoaderError;
use core_types::Movie;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const SEPARATOR: u8 = b';';
const MIN_COLUMNS: usize = 5;
const WINNER_VALUE: &str = "yes";
const PRODUCER_SEPARATOR: char = ',';
const PRODUCER_AND_SEPARATOR: &str = " and ";

// Column positions in the movie list.
const YEAR: usize = 0;
const TITLE: usize = 1;
const STUDIOS: usize = 2;
const PRODUCERS: usize = 3;
const WINNER: usize = 4;

/// Loads movies from a CSV file, or from every `*.csv` file if `path` is a directory.
pub fn load_movies(path: &Path) -> Result<Vec<Movie>, LoaderError> {
    if path.is_dir() {
        load_movies_from_dir(path)
    } else {
        load_movies_from_path(path)
    }
}

/// Loads movies from a single CSV file.
pub fn load_movies_from_path(path: &Path) -> Result<Vec<Movie>, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::NotFound(path.to_path_buf()));
    }
    tracing::info!(path = %path.display(), "Loading movies from CSV file.");

    let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_movies(&content, &path.display().to_string())
}

/// Loads movies from every `*.csv` file in `dir`, in file-name order.
pub fn load_movies_from_dir(dir: &Path) -> Result<Vec<Movie>, LoaderError> {
    if !dir.is_dir() {
        return Err(LoaderError::NotFound(dir.to_path_buf()));
    }
    let io_error = |source| LoaderError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "No CSV files found.");
        return Ok(Vec::new());
    }

    let mut movies = Vec::new();
    for file in &files {
        movies.extend(load_movies_from_path(file)?);
    }

    tracing::info!(
        files = files.len(),
        movies = movies.len(),
        "Finished loading CSV directory."
    );
    Ok(movies)
}

/// Reads a whole CSV document from `reader` and parses it.
pub fn load_movies_from_reader<R: Read>(
    mut reader: R,
    source_name: &str,
) -> Result<Vec<Movie>, LoaderError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| LoaderError::Io {
            path: PathBuf::from(source_name),
            source,
        })?;
    parse_movies(&content, source_name)
}

/// Parses a CSV document. `source_name` only appears in logs and errors.
///
/// A leading header row is skipped when detected. Blank lines are ignored.
/// Quoted fields may contain the separator and `""` escapes. The first
/// invalid row aborts the whole parse.
pub fn parse_movies(content: &str, source_name: &str) -> Result<Vec<Movie>, LoaderError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(SEPARATOR)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut movies = Vec::new();
    let mut has_header = false;
    let mut first_row = true;

    for result in reader.records() {
        let record = result.map_err(|e| LoaderError::Row {
            source_name: source_name.to_string(),
            line: e.position().map_or(0, |p| p.line() as usize),
            message: e.to_string(),
        })?;
        let fields: Vec<&str> = record.iter().collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        if first_row {
            first_row = false;
            if is_header_row(&fields) {
                has_header = true;
                continue;
            }
        }

        let line = record.position().map_or(0, |p| p.line() as usize);
        let movie = parse_movie_row(&fields).map_err(|message| LoaderError::Row {
            source_name: source_name.to_string(),
            line,
            message,
        })?;
        movies.push(movie);
    }

    if first_row {
        tracing::warn!(source = source_name, "CSV source is empty.");
        return Ok(movies);
    }

    tracing::info!(
        source = source_name,
        movies = movies.len(),
        header = has_header,
        "Parsed movie list."
    );
    Ok(movies)
}

/// The first row is a header if its first column is `year` or not a number.
fn is_header_row(fields: &[&str]) -> bool {
    if fields.len() < 2 {
        return false;
    }
    let first = fields[YEAR];
    first.eq_ignore_ascii_case("year") || first.parse::<i32>().is_err()
}

fn parse_movie_row(fields: &[&str]) -> Result<Movie, String> {
    if fields.len() < MIN_COLUMNS {
        return Err(format!(
            "Expected at least {} columns, found {}",
            MIN_COLUMNS,
            fields.len()
        ));
    }

    let year_field = fields[YEAR];
    if year_field.is_empty() {
        return Err("Year must not be empty".to_string());
    }
    let year: i32 = year_field
        .parse()
        .map_err(|_| format!("Year must be a valid number: {}", year_field))?;

    let studios = Some(fields[STUDIOS]).filter(|s| !s.is_empty());
    let producers = split_producers(fields[PRODUCERS]);
    let winner = fields[WINNER].eq_ignore_ascii_case(WINNER_VALUE);

    Movie::from_raw(year, fields[TITLE], studios, producers, winner).map_err(|e| e.to_string())
}

/// Splits `"A, B and C"` into `["A", "B", "C"]`, dropping empty fragments.
fn split_producers(field: &str) -> Vec<&str> {
    field
        .split(PRODUCER_SEPARATOR)
        .flat_map(|part| part.split(PRODUCER_AND_SEPARATOR))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Producer;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SAMPLE: &str = "\
year;title;studios;producers;winner
1980;Can't Stop the Music;Associated Film Distribution;Allan Carr;yes
1980;Cruising;Lorimar Productions, United Artists;Jerry Weintraub;
1990;The Adventures of Ford Fairlane;20th Century Fox;Steve Perry and Joel Silver;yes
";

    fn producer_names(movie: &Movie) -> Vec<&str> {
        movie.producers().iter().map(Producer::name).collect()
    }

    #[test]
    fn parses_rows_after_header() {
        let movies = parse_movies(SAMPLE, "sample").unwrap();
        assert_eq!(movies.len(), 3);

        let first = &movies[0];
        assert_eq!(first.year().value(), 1980);
        assert_eq!(first.title(), "Can't Stop the Music");
        assert_eq!(first.studios(), Some("Associated Film Distribution"));
        assert!(first.is_winner());

        assert!(!movies[1].is_winner());
        assert_eq!(producer_names(&movies[2]), vec!["Steve Perry", "Joel Silver"]);
    }

    #[test]
    fn parses_without_header() {
        let content = "1991;Hudson Hawk;TriStar Pictures;Joel Silver;yes\n";
        let movies = parse_movies(content, "no-header").unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title(), "Hudson Hawk");
    }

    #[test]
    fn splits_comma_and_and_separated_producers() {
        let content = "2015;Fantastic Four;20th Century Fox;Simon Kinberg, Matthew Vaughn, Hutch Parker, Robert Kulzer and Gregory Goodman;yes";
        let movies = parse_movies(content, "inline").unwrap();
        assert_eq!(
            producer_names(&movies[0]),
            vec![
                "Simon Kinberg",
                "Matthew Vaughn",
                "Hutch Parker",
                "Robert Kulzer",
                "Gregory Goodman"
            ]
        );
    }

    #[test]
    fn winner_flag_is_case_insensitive_and_defaults_to_false() {
        let content = "2000;A;S;P;YES\n2001;B;S;P;no\n2002;C;S;P;\n";
        let winners: Vec<bool> = parse_movies(content, "flags")
            .unwrap()
            .iter()
            .map(Movie::is_winner)
            .collect();
        assert_eq!(winners, vec![true, false, false]);
    }

    #[test]
    fn blank_lines_quotes_and_empty_studios_are_tolerated() {
        let content = "year;title;studios;producers;winner\r\n\r\n\"1984\";\"Bolero\"; ;\"Bo Derek\";yes\r\n";
        let movies = parse_movies(content, "quoted").unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].year().value(), 1984);
        assert_eq!(movies[0].title(), "Bolero");
        assert_eq!(movies[0].studios(), None);
    }

    #[test]
    fn quoted_fields_keep_separators_and_escaped_quotes() {
        let content = "year;title;studios;producers;winner\n\
1990;\"Ghosts; Can't Do It\";Triumph Releasing;Bo Derek;yes\n\
1991;\"The \"\"Best\"\" Movie\";\"Studio; Inc.\";\"A, B and C\";no\n";
        let movies = parse_movies(content, "quoted").unwrap();
        assert_eq!(movies.len(), 2);

        assert_eq!(movies[0].title(), "Ghosts; Can't Do It");
        assert_eq!(producer_names(&movies[0]), vec!["Bo Derek"]);
        assert!(movies[0].is_winner());

        assert_eq!(movies[1].title(), "The \"Best\" Movie");
        assert_eq!(movies[1].studios(), Some("Studio; Inc."));
        assert_eq!(producer_names(&movies[1]), vec!["A", "B", "C"]);
        assert!(!movies[1].is_winner());
    }

    #[test]
    fn empty_content_yields_no_movies() {
        assert!(parse_movies("", "empty").unwrap().is_empty());
        assert!(parse_movies("year;title;studios;producers;winner\n", "header-only").unwrap().is_empty());
    }

    #[test]
    fn reports_line_number_for_bad_rows() {
        let content = "year;title;studios;producers;winner\n1980;Ok;S;P;yes\n1981;Missing columns\n";
        match parse_movies(content, "broken.csv") {
            Err(LoaderError::Row { source_name, line, message }) => {
                assert_eq!(source_name, "broken.csv");
                assert_eq!(line, 3);
                assert!(message.contains("at least 5 columns"));
            }
            other => panic!("expected row error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_field_values() {
        let bad_year = parse_movies("1980;A;S;P;yes\nabc;B;S;P;yes\n", "x").unwrap_err();
        assert!(bad_year.to_string().contains("Year must be a valid number"));

        let out_of_range = parse_movies("1850;A;S;P;yes\n", "x").unwrap_err();
        assert!(out_of_range.to_string().contains("between 1900 and 2100"));

        let no_title = parse_movies("1980;;S;P;yes\n", "x").unwrap_err();
        assert!(no_title.to_string().contains("Title must not be empty"));

        let no_producers = parse_movies("1980;A;S;;yes\n", "x").unwrap_err();
        assert!(no_producers.to_string().contains("at least one producer"));
    }

    #[test]
    fn loads_from_reader() {
        let movies = load_movies_from_reader(SAMPLE.as_bytes(), "reader").unwrap();
        assert_eq!(movies.len(), 3);
    }

    #[test]
    fn loads_from_file_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let movies = load_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 3);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            load_movies_from_path(&missing),
            Err(LoaderError::NotFound(path)) if path == missing
        ));
    }

    #[test]
    fn loads_every_csv_in_directory_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.csv"), "1991;Hudson Hawk;TriStar;Joel Silver;yes\n").unwrap();
        fs::write(dir.path().join("a.csv"), SAMPLE).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a csv").unwrap();

        let movies = load_movies(dir.path()).unwrap();
        assert_eq!(movies.len(), 4);
        assert_eq!(movies[0].title(), "Can't Stop the Music");
        assert_eq!(movies[3].title(), "Hudson Hawk");
    }

    #[test]
    fn empty_directory_yields_no_movies() {
        let dir = TempDir::new().unwrap();
        assert!(load_movies_from_dir(dir.path()).unwrap().is_empty());
    }
}
