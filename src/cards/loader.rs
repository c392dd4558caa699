//! CSV catalog loader.
//!
//! Headers are matched case-insensitively after trimming:
//!
//! | Column | Meaning |
//! |---|---|
//! | `number` | card number, required |
//! | `filename` | image file |
//! | `card name`, `card_name`, `title` | title |
//! | `description`, `instruction` | body texts |
//! | `type`, `text` | free-form extras |
//!
//! A text column may carry a language suffix (`card name_pl`,
//! `description_pl`). Unsuffixed text columns belong to the base language.
//!
//! Rows whose number is blank, not an integer, or outside `0..=499` are
//! skipped. Unreadable files and malformed CSV fail the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::core::{CardNumber, CatalogError};

use super::catalog::CardCatalog;
use super::record::{CardRecord, DisplayFields, LanguageTag, TextField};

/// What a CSV column holds.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Column {
    Number,
    Filename,
    Text(LanguageTag, TextField),
    Type,
    RawText,
    Ignored,
}

/// Configurable CSV loader.
#[derive(Clone, Debug)]
pub struct CsvLoader {
    base_language: LanguageTag,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            base_language: LanguageTag::base(),
        }
    }
}

impl CsvLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Language assigned to unsuffixed text columns.
    #[must_use]
    pub fn with_base_language(mut self, language: LanguageTag) -> Self {
        self.base_language = language;
        self
    }

    /// Load from a file.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<CardCatalog, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = self.load_reader(file)?;
        info!(path = %path.display(), "loaded card catalog");
        Ok(catalog)
    }

    /// Load from any reader producing CSV with a header row.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<CardCatalog, CatalogError> {
        let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns: Vec<Column> = csv
            .headers()?
            .iter()
            .map(|h| self.classify(h))
            .collect();
        if !columns.contains(&Column::Number) {
            return Err(CatalogError::MissingColumn("number"));
        }

        let mut catalog = CardCatalog::new();
        let mut skipped = 0usize;

        for (index, row) in csv.records().enumerate() {
            let row = row?;
            match self.parse_row(&columns, &row) {
                Some(record) => catalog.insert(record),
                None => {
                    skipped += 1;
                    // Header is line 1
                    debug!(line = index + 2, "skipping row without a valid card number");
                }
            }
        }

        let stats = catalog.stats();
        info!(
            numbers = stats.numbers,
            total = stats.total,
            skipped,
            "parsed card rows"
        );
        Ok(catalog)
    }

    fn parse_row(&self, columns: &[Column], row: &csv::StringRecord) -> Option<CardRecord> {
        let mut number = None;
        let mut filename = "";
        let mut card_type = "";
        let mut raw_text = "";
        let mut fields = DisplayFields::new(self.base_language.clone());

        for (column, value) in columns.iter().zip(row.iter()) {
            match column {
                Column::Number => {
                    let value = value.trim();
                    if value.is_empty() {
                        return None;
                    }
                    number = Some(CardNumber::parse_entry(value).ok()?);
                }
                Column::Filename => filename = value,
                Column::Text(language, field) => {
                    // First non-blank column for a language and field wins
                    let taken = fields
                        .get(language)
                        .is_some_and(|text| text.get(*field).is_some());
                    if !taken && !value.trim().is_empty() {
                        fields.set(language.clone(), *field, value);
                    }
                }
                Column::Type => card_type = value,
                Column::RawText => raw_text = value,
                Column::Ignored => {}
            }
        }

        Some(
            CardRecord::new(number?, filename)
                .with_type(card_type)
                .with_raw_text(raw_text)
                .with_fields(fields),
        )
    }

    fn classify(&self, header: &str) -> Column {
        let header = header.trim().to_ascii_lowercase();
        match header.as_str() {
            "number" => return Column::Number,
            "filename" => return Column::Filename,
            "type" => return Column::Type,
            "text" => return Column::RawText,
            _ => {}
        }

        if let Some(field) = text_field(&header) {
            return Column::Text(self.base_language.clone(), field);
        }

        // `<field>_<lang>` with a 2-3 letter language
        if let Some((stem, lang)) = header.rsplit_once('_') {
            let is_lang = (2..=3).contains(&lang.len())
                && lang.chars().all(|c| c.is_ascii_alphabetic());
            if is_lang {
                if let Some(field) = text_field(stem.trim()) {
                    return Column::Text(LanguageTag::new(lang), field);
                }
            }
        }

        Column::Ignored
    }
}

fn text_field(name: &str) -> Option<TextField> {
    match name {
        "card name" | "card_name" | "title" => Some(TextField::Title),
        "description" => Some(TextField::Description),
        "instruction" => Some(TextField::Instruction),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(tag: &str) -> LanguageTag {
        LanguageTag::new(tag)
    }

    #[test]
    fn test_classify_headers() {
        let loader = CsvLoader::new();
        assert_eq!(loader.classify(" Number "), Column::Number);
        assert_eq!(loader.classify("FILENAME"), Column::Filename);
        assert_eq!(
            loader.classify("Card Name"),
            Column::Text(lang("en"), TextField::Title)
        );
        assert_eq!(
            loader.classify("card_name"),
            Column::Text(lang("en"), TextField::Title)
        );
        assert_eq!(
            loader.classify("card name_PL"),
            Column::Text(lang("pl"), TextField::Title)
        );
        assert_eq!(
            loader.classify("instruction_pl"),
            Column::Text(lang("pl"), TextField::Instruction)
        );
        assert_eq!(loader.classify("type"), Column::Type);
        assert_eq!(loader.classify("text"), Column::RawText);
        assert_eq!(loader.classify("notes_pl"), Column::Ignored);
        assert_eq!(loader.classify("whatever"), Column::Ignored);
    }

    #[test]
    fn test_custom_base_language() {
        let loader = CsvLoader::new().with_base_language(lang("de"));
        assert_eq!(
            loader.classify("description"),
            Column::Text(lang("de"), TextField::Description)
        );
    }

    #[test]
    fn test_load_reader() {
        let data = "\
number,filename,card name,card name_pl,description_pl
5,./005.png,Harbor,Port,Opis
012,012a.png,Gate A,,
12,012b.png,Gate B,,
oops,x.png,Bad,,
500,y.png,Too big,,
,z.png,Blank,,
";
        let catalog = CsvLoader::new().load_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.stats().numbers, 2);
        assert_eq!(catalog.len(), 3);

        let five = catalog.variants(CardNumber::new(5).unwrap());
        let card = five.first().unwrap();
        assert_eq!(card.filename, "005.png");
        assert_eq!(card.image_url, "cards/005.png");
        assert_eq!(card.fields.resolve(&lang("pl"), TextField::Title), Some("Port"));
        assert_eq!(card.fields.resolve(&lang("en"), TextField::Title), Some("Harbor"));

        let twelve = catalog.variants(CardNumber::new(12).unwrap());
        assert_eq!(twelve.len(), 2);
        assert_eq!(twelve.get(1).unwrap().filename, "012b.png");
    }

    #[test]
    fn test_duplicate_title_columns() {
        let data = "\
number,card name,card_name
5,Harbor,
6,,Lighthouse
7,Gate,Other gate
";
        let catalog = CsvLoader::new().load_reader(data.as_bytes()).unwrap();
        let title = |n: u32| {
            catalog
                .variants(CardNumber::new(n).unwrap())
                .first()
                .and_then(|card| card.fields.resolve(&lang("en"), TextField::Title))
                .map(str::to_string)
        };

        assert_eq!(title(5).as_deref(), Some("Harbor"));
        assert_eq!(title(6).as_deref(), Some("Lighthouse"));
        assert_eq!(title(7).as_deref(), Some("Gate"));
    }

    #[test]
    fn test_missing_number_column() {
        let data = "filename,card name\na.png,A\n";
        let err = CsvLoader::new().load_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("number")));
    }

    #[test]
    fn test_missing_file() {
        let err = CsvLoader::new()
            .load_path("/definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
