use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use super::body::{BodyId, OrbitalBody};
use crate::error::{CatalogError, Error, Result};

/// The fixed set of bodies for a session.
///
/// Invariant: exactly one body has zero distance (the central body), and every
/// other body has strictly positive distance and angular speed.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<OrbitalBody>,
}

/// On-disk form of a body, as it appears in a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub id: BodyId,
    pub radius: f32,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub speed: f64,
    pub color: String,
}

const SOLAR_SYSTEM: [(&str, f32, f64, f64, &str); 9] = [
    ("sun", 5.0, 0.0, 0.0, "ffcc33"),
    ("mercury", 0.5, 10.0, 0.0479, "9c9c9c"),
    ("venus", 0.8, 15.0, 0.035, "e6c27a"),
    ("earth", 1.0, 20.0, 0.03, "2e6fdb"),
    ("mars", 0.7, 25.0, 0.0241, "c1440e"),
    ("jupiter", 3.0, 40.0, 0.0131, "d8ca9d"),
    ("saturn", 2.5, 60.0, 0.0097, "e3c16f"),
    ("uranus", 2.0, 80.0, 0.0068, "9fd8e0"),
    ("neptune", 1.8, 100.0, 0.0054, "3f54ba"),
];

impl Catalog {
    pub fn new(bodies: Vec<OrbitalBody>) -> std::result::Result<Self, CatalogError> {
        if bodies.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut num_central = 0;
        for body in bodies.iter() {
            if !seen.insert(&body.id) {
                return Err(CatalogError::DuplicateId(body.id.clone()));
            }
            if !(body.radius > 0.0) {
                return Err(CatalogError::InvalidRadius(body.id.clone()));
            }

            if body.distance == 0.0 {
                if body.angular_speed != 0.0 {
                    return Err(CatalogError::InvalidOrbit(body.id.clone()));
                }
                num_central += 1;
            } else if !(body.distance > 0.0 && body.angular_speed > 0.0) {
                return Err(CatalogError::InvalidOrbit(body.id.clone()));
            }
        }

        if num_central != 1 {
            return Err(CatalogError::CentralBodyCount(num_central));
        }

        Ok(Catalog { bodies })
    }

    /// The sun and the eight planets, at display scale rather than physical scale.
    pub fn solar_system() -> Self {
        let records = SOLAR_SYSTEM
            .iter()
            .map(|&(id, radius, distance, speed, color)| BodyRecord {
                id: BodyId::new(id),
                radius,
                distance,
                speed,
                color: color.to_owned(),
            })
            .collect();
        Self::from_records(records).expect("built-in catalog is valid")
    }

    pub fn from_records(records: Vec<BodyRecord>) -> std::result::Result<Self, CatalogError> {
        let bodies = records
            .into_iter()
            .map(|record| {
                let color = parse_color(&record.color)
                    .ok_or_else(|| CatalogError::InvalidColor(record.id.clone(), record.color))?;
                Ok(OrbitalBody {
                    id: record.id,
                    radius: record.radius,
                    distance: record.distance,
                    angular_speed: record.speed,
                    color,
                })
            })
            .collect::<std::result::Result<Vec<_>, CatalogError>>()?;
        Self::new(bodies)
    }

    /// Loads a RON list of `BodyRecord`s.
    pub fn read_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let records: Vec<BodyRecord> = ron::from_str(&contents).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })?;
        let catalog = Self::from_records(records)?;
        tracing::info!(
            "Loaded {} bodies from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, id: &BodyId) -> Option<&OrbitalBody> {
        self.bodies.iter().find(|b| &b.id == id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &OrbitalBody> {
        self.bodies.iter()
    }

    pub fn central(&self) -> &OrbitalBody {
        self.bodies
            .iter()
            .find(|b| b.is_central())
            .expect("catalog always has a central body")
    }

    pub fn orbiting(&self) -> impl Iterator<Item = &OrbitalBody> {
        self.bodies.iter().filter(|b| !b.is_central())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Fixed mapping from body to texture file, resolved once at startup.
#[derive(Debug, Clone)]
pub struct TextureTable {
    paths: HashMap<BodyId, PathBuf>,
}

impl TextureTable {
    /// Fails if any body in the catalog has no entry. Extra entries are ignored.
    pub fn new<I>(catalog: &Catalog, entries: I) -> std::result::Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (BodyId, PathBuf)>,
    {
        let mut paths: HashMap<_, _> = entries.into_iter().collect();
        for body in catalog.bodies() {
            if !paths.contains_key(&body.id) {
                return Err(CatalogError::MissingTexture(body.id.clone()));
            }
        }
        paths.retain(|id, _| catalog.get(id).is_some());
        Ok(TextureTable { paths })
    }

    /// `<dir>/<id>.jpg` for every body.
    pub fn standard(catalog: &Catalog, dir: &Path) -> Self {
        let paths = catalog
            .bodies()
            .map(|b| (b.id.clone(), dir.join(format!("{}.jpg", b.id))))
            .collect();
        TextureTable { paths }
    }

    pub fn get(&self, id: &BodyId) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    /// Checks that every texture file is present, so that a typo is reported up front
    /// instead of surfacing from inside the renderer.
    pub fn verify_files(&self) -> Result<()> {
        let mut paths: Vec<_> = self.paths.values().collect();
        paths.sort();
        for path in paths {
            if !path.is_file() {
                return Err(Error::AssetNotFound(path.clone()));
            }
        }
        Ok(())
    }
}

fn parse_color(s: &str) -> Option<Point3<f32>> {
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16)
            .ok()
            .map(|c| c as f32 / 255.0)
    };
    Some(Point3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
