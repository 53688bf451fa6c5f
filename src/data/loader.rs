use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::core::constants::files;
use crate::core::error::{DashboardError, Result};
use crate::core::types::DatasetKind;
use crate::data::cache::{CacheKey, DatasetCache};
use crate::data::records::{
    DisorderRecord, FacilityRecord, RiskFactorRecord, SuicideRiskRecord, WorkforceRecord,
};
use crate::data::table::Table;

/// Where each of the five datasets is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub disorders: PathBuf,
    pub facilities: PathBuf,
    pub workforce: PathBuf,
    pub suicide_risk: PathBuf,
    pub risk_factors: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dir(files::DATA_DIR)
    }
}

impl DatasetPaths {
    /// Default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            disorders: dir.join(files::DISORDERS),
            facilities: dir.join(files::FACILITIES),
            workforce: dir.join(files::WORKFORCE),
            suicide_risk: dir.join(files::SUICIDE_RISK),
            risk_factors: dir.join(files::RISK_FACTORS),
        }
    }

    /// Resolve paths from configuration. Relative per-file overrides are
    /// taken relative to the data directory.
    pub fn from_config(config: &Config) -> Self {
        let dir = PathBuf::from(config.data_dir.as_deref().unwrap_or(files::DATA_DIR));
        let resolve = |value: &Option<String>, default: &str| match value {
            Some(file) => dir.join(file),
            None => dir.join(default),
        };

        Self {
            disorders: resolve(&config.disorders_file, files::DISORDERS),
            facilities: resolve(&config.facilities_file, files::FACILITIES),
            workforce: resolve(&config.workforce_file, files::WORKFORCE),
            suicide_risk: resolve(&config.suicide_risk_file, files::SUICIDE_RISK),
            risk_factors: resolve(&config.risk_factors_file, files::RISK_FACTORS),
        }
    }

    pub fn path(&self, kind: DatasetKind) -> &Path {
        match kind {
            DatasetKind::Disorders => &self.disorders,
            DatasetKind::Facilities => &self.facilities,
            DatasetKind::Workforce => &self.workforce,
            DatasetKind::SuicideRisk => &self.suicide_risk,
            DatasetKind::RiskFactors => &self.risk_factors,
        }
    }
}

/// Read `path` as a `kind` table through `cache`.
pub fn load_table(kind: DatasetKind, path: &Path, cache: &DatasetCache) -> Result<Arc<Table>> {
    if !path.is_file() {
        return Err(DashboardError::FileNotFound(path.display().to_string()));
    }

    let key = CacheKey::for_file(kind, path)?;
    cache.get_or_load(key, || read_table(kind, path))
}

fn read_table(kind: DatasetKind, path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let mut table = Table::from_reader(kind, file)?;
    apply_renames(&mut table);
    debug!(
        "Read {} rows from {} with columns {:?}",
        table.len(),
        path.display(),
        table.column_names()
    );
    Ok(table)
}

/// Map source-specific headers onto the canonical column names.
fn apply_renames(table: &mut Table) {
    match table.kind() {
        DatasetKind::Disorders => {}
        DatasetKind::Facilities => {
            table.rename("nb_of_users_per_100000", "users_per_100k");
        }
        DatasetKind::Workforce => {
            if table.has_column("position") && table.has_column("nb_staff_per_100000") {
                table.rename("position", "profession");
                table.rename("nb_staff_per_100000", "workers_per_100k");
            }
        }
        // Headers of the first two columns vary between exports, positions do not
        DatasetKind::SuicideRisk => {
            table.rename_at(0, "disorder");
            table.rename_at(1, "or");
        }
        DatasetKind::RiskFactors => {
            table.rename("val", "ylds_rate_per_100k");
            table.rename("upper", "ci_upper");
            table.rename("lower", "ci_lower");
            table.rename("risk", "risk_factor");
        }
    }
}

pub fn load_disorders(path: &Path, cache: &DatasetCache) -> Result<Arc<Table>> {
    load_table(DatasetKind::Disorders, path, cache)
}

pub fn load_facilities(path: &Path, cache: &DatasetCache) -> Result<Arc<Table>> {
    load_table(DatasetKind::Facilities, path, cache)
}

pub fn load_workforce(path: &Path, cache: &DatasetCache) -> Result<Arc<Table>> {
    load_table(DatasetKind::Workforce, path, cache)
}

pub fn load_suicide_risk(path: &Path, cache: &DatasetCache) -> Result<Arc<Table>> {
    load_table(DatasetKind::SuicideRisk, path, cache)
}

pub fn load_risk_factors(path: &Path, cache: &DatasetCache) -> Result<Arc<Table>> {
    load_table(DatasetKind::RiskFactors, path, cache)
}

/// All five datasets decoded into typed records for one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub disorders: Vec<DisorderRecord>,
    pub facilities: Vec<FacilityRecord>,
    pub workforce: Vec<WorkforceRecord>,
    pub suicide_risk: Vec<SuicideRiskRecord>,
    pub risk_factors: Vec<RiskFactorRecord>,
}

impl Datasets {
    pub fn load(paths: &DatasetPaths, cache: &DatasetCache) -> Result<Self> {
        Self::load_with(paths, cache, |_, _| {})
    }

    /// Load every dataset, calling `on_loaded` after each table is available.
    pub fn load_with<F>(paths: &DatasetPaths, cache: &DatasetCache, mut on_loaded: F) -> Result<Self>
    where
        F: FnMut(DatasetKind, &Table),
    {
        let mut load = |kind: DatasetKind| -> Result<Arc<Table>> {
            let table = load_table(kind, paths.path(kind), cache)?;
            on_loaded(kind, &table);
            Ok(table)
        };

        Ok(Self {
            disorders: load(DatasetKind::Disorders)?.typed()?,
            facilities: load(DatasetKind::Facilities)?.typed()?,
            workforce: load(DatasetKind::Workforce)?.typed()?,
            suicide_risk: load(DatasetKind::SuicideRisk)?.typed()?,
            risk_factors: load(DatasetKind::RiskFactors)?.typed()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::is_normalized;
    use std::fs;

    const DISORDERS_CSV: &str = "Country,Cause,Sex,Age,Year,Prevalence rate,Incidence rate,YLDs rate\n\
        Lebanon,Anxiety disorders,Female,All ages,2021,1000,90,120\n";
    const FACILITIES_CSV: &str = "Facility type,Nb of users per 100000\nOutpatient,350.5\n";
    const WORKFORCE_CSV: &str = "Position,Nb staff per 100000\nPsychiatrists,1.2\n";
    const SUICIDE_CSV: &str = "Mental disorder,OR,CI lower,CI higher\nDepression,6.2,4.1,9.3\n";
    const RISK_FACTORS_CSV: &str = "cause,risk,sex,age,val,upper,lower\n\
        Anxiety disorders,Behavioral risks,Female,15-19 years,10.5,14.1,7.2\n";

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(files::DISORDERS), DISORDERS_CSV).unwrap();
        fs::write(dir.path().join(files::FACILITIES), FACILITIES_CSV).unwrap();
        fs::write(dir.path().join(files::WORKFORCE), WORKFORCE_CSV).unwrap();
        fs::write(dir.path().join(files::SUICIDE_RISK), SUICIDE_CSV).unwrap();
        fs::write(dir.path().join(files::RISK_FACTORS), RISK_FACTORS_CSV).unwrap();
        dir
    }

    #[test]
    fn test_loaders_normalize_and_rename() -> Result<()> {
        let dir = data_dir();
        let paths = DatasetPaths::in_dir(dir.path());
        let cache = DatasetCache::new();

        let facilities = load_facilities(&paths.facilities, &cache)?;
        assert_eq!(facilities.column_names(), vec!["facility_type", "users_per_100k"]);

        let workforce = load_workforce(&paths.workforce, &cache)?;
        assert_eq!(workforce.column_names(), vec!["profession", "workers_per_100k"]);

        let suicide = load_suicide_risk(&paths.suicide_risk, &cache)?;
        assert_eq!(
            suicide.column_names(),
            vec!["disorder", "or", "ci_lower", "ci_higher"]
        );

        let risk = load_risk_factors(&paths.risk_factors, &cache)?;
        assert_eq!(
            risk.column_names(),
            vec!["cause", "risk_factor", "sex", "age", "ylds_rate_per_100k", "ci_upper", "ci_lower"]
        );

        let disorders = load_disorders(&paths.disorders, &cache)?;
        assert!(disorders.column_names().iter().all(|c| is_normalized(c)));
        Ok(())
    }

    #[test]
    fn test_workforce_rename_needs_both_columns() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("hr.csv");
        fs::write(&path, "Position,Count\nNurses,3\n")?;

        let table = load_workforce(&path, &DatasetCache::new())?;
        assert_eq!(table.column_names(), vec!["position", "count"]);
        assert!(matches!(
            table.typed::<WorkforceRecord>(),
            Err(DashboardError::MissingColumn { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_loading_twice_yields_identical_tables() -> Result<()> {
        let dir = data_dir();
        let paths = DatasetPaths::in_dir(dir.path());

        let cached = DatasetCache::new();
        let first = load_disorders(&paths.disorders, &cached)?;
        let second = load_disorders(&paths.disorders, &cached)?;
        assert!(Arc::ptr_eq(&first, &second));

        let fresh = load_disorders(&paths.disorders, &DatasetCache::new())?;
        assert_eq!(*first, *fresh);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_disorders(Path::new("/no/such/dir/file.csv"), &DatasetCache::new());
        match result {
            Err(DashboardError::FileNotFound(path)) => assert!(path.contains("file.csv")),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_datasets_load_calls_observer_for_each_table() -> Result<()> {
        let dir = data_dir();
        let paths = DatasetPaths::in_dir(dir.path());
        let mut seen = Vec::new();

        let datasets = Datasets::load_with(&paths, &DatasetCache::new(), |kind, table| {
            seen.push((kind, table.len()));
        })?;

        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0], (DatasetKind::Disorders, 1));
        assert_eq!(datasets.disorders[0].prevalence_rate, 1000.0);
        assert_eq!(datasets.facilities[0].users_per_100k, 350.5);
        assert_eq!(datasets.workforce[0].profession.as_deref(), Some("Psychiatrists"));
        assert_eq!(datasets.suicide_risk[0].odds_ratio, 6.2);
        assert_eq!(datasets.risk_factors[0].risk_factor, "Behavioral risks");
        Ok(())
    }

    #[test]
    fn test_paths_from_config() {
        let config = Config {
            data_dir: Some("/data".to_string()),
            workforce_file: Some("staff.csv".to_string()),
            ..Default::default()
        };
        let paths = DatasetPaths::from_config(&config);
        assert_eq!(paths.disorders, PathBuf::from("/data").join(files::DISORDERS));
        assert_eq!(paths.workforce, PathBuf::from("/data/staff.csv"));
        assert_eq!(paths.path(DatasetKind::Workforce), Path::new("/data/staff.csv"));
    }
}
