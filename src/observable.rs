use crate::error::LoadError;
use crate::prelude::*;
use std::collections::VecDeque;
use std::error::Error;
use std::io::Read;
use tracing::warn;

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Name,
    Mother,
    Father,
    Trait,
    Ignored,
}

/// Produces Observations from u8 delimited pedigree data
///
/// `Csv` implements Iterator so it can be passed
/// directly to `Population::observe()`
pub struct Csv {
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
    fields: Vec<Field>,
    observation_buffer: VecDeque<Observation>,
    trait_present_identifier: String,
    trait_absent_identifier: String,
}

impl Csv {
    fn new(
        records: csv::StringRecordsIntoIter<Box<dyn Read>>,
        fields: Vec<Field>,
        trait_present_identifier: &str,
        trait_absent_identifier: &str,
    ) -> Self {
        Self {
            records,
            fields,
            observation_buffer: VecDeque::new(),
            trait_present_identifier: trait_present_identifier.to_owned(),
            trait_absent_identifier: trait_absent_identifier.to_owned(),
        }
    }

    fn observations(&self, row: &csv::StringRecord) -> VecDeque<Observation> {
        let name = match self
            .fields
            .iter()
            .zip(row.iter())
            .find(|(field, _)| **field == Field::Name)
        {
            Some((_, name)) if !name.is_empty() => name.to_string(),
            _ => return VecDeque::new(),
        };

        let mut observations = VecDeque::new();
        observations.push_back(Observation::Individual(name.clone()));
        for (field, value) in self.fields.iter().zip(row.iter()) {
            if value.is_empty() {
                continue;
            }
            match field {
                Field::Mother => {
                    observations.push_back(Observation::Mother(name.clone(), value.into()))
                }
                Field::Father => {
                    observations.push_back(Observation::Father(name.clone(), value.into()))
                }
                Field::Trait => {
                    if value == self.trait_present_identifier {
                        observations.push_back(Observation::Trait(name.clone(), true));
                    } else if value == self.trait_absent_identifier {
                        observations.push_back(Observation::Trait(name.clone(), false));
                    } else {
                        warn!(individual = %name, value, "unrecognised trait flag, treating as unknown");
                    }
                }
                Field::Name | Field::Ignored => {}
            }
        }
        observations
    }
}

impl Iterator for Csv {
    type Item = Result<Observation, Box<dyn Error>>;

    fn next(&mut self) -> Option<Result<Observation, Box<dyn Error>>> {
        while self.observation_buffer.is_empty() {
            match self.records.next()? {
                Ok(row) => {
                    self.observation_buffer = self.observations(&row);
                }
                Err(e) => {
                    return Some(Err(Box::new(LoadError::from(e))));
                }
            }
        }

        self.observation_buffer.pop_front().map(Ok)
    }
}

pub struct CsvBuilder {
    delimiter: u8,
    name_field: String,
    mother_field: String,
    father_field: String,
    trait_field: String,
    trait_present_identifier: String,
    trait_absent_identifier: String,
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvBuilder {
    /// Construct a new Csv builder
    ///
    /// Defaults to comma delimited data with `name`, `mother`, `father`,
    /// and `trait` columns, where a trait of `1` is present and `0` absent.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            name_field: "name".to_owned(),
            mother_field: "mother".to_owned(),
            father_field: "father".to_owned(),
            trait_field: "trait".to_owned(),
            trait_present_identifier: "1".to_owned(),
            trait_absent_identifier: "0".to_owned(),
        }
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn name_field(&mut self, name_field: &str) -> &mut Self {
        self.name_field = name_field.to_owned();
        self
    }

    pub fn mother_field(&mut self, mother_field: &str) -> &mut Self {
        self.mother_field = mother_field.to_owned();
        self
    }

    pub fn father_field(&mut self, father_field: &str) -> &mut Self {
        self.father_field = father_field.to_owned();
        self
    }

    pub fn trait_field(&mut self, trait_field: &str) -> &mut Self {
        self.trait_field = trait_field.to_owned();
        self
    }

    /// Values of the trait column meaning present and absent.
    /// Any other non-empty value is treated as unknown.
    pub fn trait_identifiers(&mut self, present: &str, absent: &str) -> &mut Self {
        self.trait_present_identifier = present.to_owned();
        self.trait_absent_identifier = absent.to_owned();
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<Csv, Box<dyn Error>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let fields: Vec<Field> = rdr
            .headers()
            .map_err(LoadError::from)?
            .iter()
            .map(|s| {
                if s == self.name_field {
                    Field::Name
                } else if s == self.mother_field {
                    Field::Mother
                } else if s == self.father_field {
                    Field::Father
                } else if s == self.trait_field {
                    Field::Trait
                } else {
                    Field::Ignored
                }
            })
            .collect();

        if !fields.contains(&Field::Name) {
            return Err(Box::new(LoadError::MissingColumn(self.name_field.clone())));
        }

        Ok(Csv::new(
            rdr.into_records(),
            fields,
            &self.trait_present_identifier,
            &self.trait_absent_identifier,
        ))
    }
}
