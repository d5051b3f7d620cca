//! Fixtures shared by the integration tests.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

pub const HEADER: &str =
    "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

/// A small catalog exercising every cleaning rule.
pub const CATALOG_ROWS: &[&str] = &[
    r#"s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,"September 25, 2021",2020,PG-13,90 min,Documentaries,a"#,
    r#"s2,TV Show,Blood & Water,,"Ama Qamata, Khosi Ngema",South Africa,"September 24, 2021",2021,TV-MA,2 Seasons,"International TV Shows, TV Dramas, TV Mysteries",b"#,
    r#"s3,TV Show,Ganglands,Julien Leclercq,Sami Bouajila,,"September 24, 2021",2021,TV-MA,1 Season,"Crime TV Shows, International TV Shows, TV Action & Adventure",c"#,
    r#"s4,Movie,Sankofa,Haile Gerima,Kofi Ghanaba,"United States, Ghana, Burkina Faso, United Kingdom, Germany, Ethiopia","September 24, 2021",1993,TV-MA,125 min,"Dramas, Independent Movies, International Movies",d"#,
    r#"s5,Movie,The Starling,Theodore Melfi,Melissa McCarthy,United States,"September 24, 2021",2021,PG-13,104 min,"Comedies, Dramas",e"#,
    r#"s6,Movie,Undated,Haile Gerima,Someone,India,,2019,TV-14,95 min,Dramas,f"#,
    r#"s7,Movie,No Rating,Haile Gerima,Someone,India,"May 1, 2020",2019,,95 min,Dramas,g"#,
    r#"s8,Movie,Odd Date,Haile Gerima,Someone,"India,",someday,2000,TV-14,100 min,"Dramas, Comedies",h"#,
    r#"s9,TV Show,Old Show,Someone Else,Someone,India,"January 1, 2001",2000,TV-14,3 Seasons,"TV Dramas",i"#,
];

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create fixture");
        file.write_all(contents.as_bytes()).expect("write fixture");
        path
    }

    pub fn catalog_csv(&self) -> PathBuf {
        let mut text = String::from(HEADER);
        for row in CATALOG_ROWS {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        self.write("catalog.csv", &text)
    }
}
