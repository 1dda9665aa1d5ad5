//! Static catalog of the bodies Spacecast draws.
//!
//! Three tables live here:
//! - [`SOLAR_SYSTEM`]: the sun and the eight planets (circular orbits)
//! - [`ORBITERS`]: comets and dwarf planets with Keplerian elements
//! - [`NEAREST_STARS`]: the nearest stars, in catalog equatorial coordinates
//!
//! Distances are in base units (see [`crate::units`]). The star table keeps the
//! sexagesimal coordinates as published; [`nearest_stars`] converts them.
//!
//! See: <https://en.wikipedia.org/wiki/List_of_nearest_stars_and_brown_dwarfs>

use crate::textures::TextureRef;
use crate::units::{self, AU, EARTH_DIAMETER, MILE};

/// Descriptive text attached to a body and shown in the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyInfo {
    pub description: Option<&'static str>,
    pub description_source: Option<&'static str>,
}

impl BodyInfo {
    const fn new(description: &'static str, source: &'static str) -> Self {
        Self {
            description: Some(description),
            description_source: Some(source),
        }
    }
}

/// A sun or planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub radius: f64,
    /// `None` for bodies that do not orbit anything (the sun).
    pub orbit_radius: Option<f64>,
    /// Orbital period in days.
    pub period_days: Option<f64>,
    pub map: Option<TextureRef>,
    pub bump_map: Option<TextureRef>,
    /// Tint used when the texture map is unavailable.
    pub color: [u8; 3],
    pub info: BodyInfo,
}

impl CelestialBody {
    /// Whether this is the home planet (gets the atmosphere and cloud layers).
    pub fn is_home(&self) -> bool {
        self.name == HOME_PLANET
    }
}

/// Name of the body that carries the atmosphere and cloud layers.
pub const HOME_PLANET: &str = "Earth";

/// Name of the central star.
pub const SUN: &str = "Sun";

pub static SOLAR_SYSTEM: [CelestialBody; 9] = [
    CelestialBody {
        name: SUN,
        radius: 432169.0 * MILE,
        orbit_radius: None,
        period_days: None,
        map: Some("images/sunmap.jpg"),
        bump_map: None,
        color: [255, 214, 120],
        info: BodyInfo::new("Our home star.", "https://en.wikipedia.org/wiki/Sun"),
    },
    CelestialBody {
        name: "Mercury",
        radius: 1516.0 * MILE,
        orbit_radius: Some(0.387 * AU),
        period_days: Some(87.969),
        map: Some("images/mercurymap.jpg"),
        bump_map: Some("images/mercurybump.jpg"),
        color: [160, 150, 140],
        info: BodyInfo::new(
            "Mercury is the smallest planet and the closest to the sun. It has almost no atmosphere, so its surface swings between scorching days and freezing nights.",
            "https://en.wikipedia.org/wiki/Mercury_(planet)",
        ),
    },
    CelestialBody {
        name: "Venus",
        radius: 3760.0 * MILE,
        orbit_radius: Some(0.723 * AU),
        period_days: Some(224.701),
        map: Some("images/venusmap.jpg"),
        bump_map: Some("images/venusbump.jpg"),
        color: [230, 200, 140],
        info: BodyInfo::new(
            "Venus is wrapped in a thick carbon dioxide atmosphere that makes it the hottest planet in the Solar System.",
            "https://en.wikipedia.org/wiki/Venus",
        ),
    },
    CelestialBody {
        name: HOME_PLANET,
        radius: EARTH_DIAMETER / 2.0,
        orbit_radius: Some(AU),
        period_days: Some(365.256),
        map: Some("images/earthmap.jpg"),
        bump_map: Some("images/earthbump.jpg"),
        color: [80, 140, 230],
        info: BodyInfo::new(
            "Our home planet, and the only place known to harbor life.",
            "https://en.wikipedia.org/wiki/Earth",
        ),
    },
    CelestialBody {
        name: "Mars",
        radius: 2106.0 * MILE,
        orbit_radius: Some(1.524 * AU),
        period_days: Some(686.980),
        map: Some("images/marsmap.jpg"),
        bump_map: Some("images/marsbump.jpg"),
        color: [210, 110, 70],
        info: BodyInfo::new(
            "Mars is a cold desert world whose iron oxide dust gives it a red color.",
            "https://en.wikipedia.org/wiki/Mars",
        ),
    },
    CelestialBody {
        name: "Jupiter",
        radius: 43441.0 * MILE,
        orbit_radius: Some(5.203 * AU),
        period_days: Some(4332.59),
        map: Some("images/jupitermap.jpg"),
        bump_map: None,
        color: [215, 185, 150],
        info: BodyInfo::new(
            "Jupiter is the largest planet, a gas giant more than twice as massive as all the other planets combined.",
            "https://en.wikipedia.org/wiki/Jupiter",
        ),
    },
    CelestialBody {
        name: "Saturn",
        radius: 36184.0 * MILE,
        orbit_radius: Some(9.539 * AU),
        period_days: Some(10759.22),
        map: Some("images/saturnmap.jpg"),
        bump_map: None,
        color: [230, 210, 160],
        info: BodyInfo::new(
            "Saturn is a gas giant best known for its bright system of rings.",
            "https://en.wikipedia.org/wiki/Saturn",
        ),
    },
    CelestialBody {
        name: "Uranus",
        radius: 15759.0 * MILE,
        orbit_radius: Some(19.18 * AU),
        period_days: Some(30688.5),
        map: Some("images/uranusmap.jpg"),
        bump_map: None,
        color: [170, 220, 230],
        info: BodyInfo::new(
            "Uranus is an ice giant that rotates on its side.",
            "https://en.wikipedia.org/wiki/Uranus",
        ),
    },
    CelestialBody {
        name: "Neptune",
        radius: 15299.0 * MILE,
        orbit_radius: Some(30.06 * AU),
        period_days: Some(60182.0),
        map: Some("images/neptunemap.jpg"),
        bump_map: None,
        color: [90, 120, 230],
        info: BodyInfo::new(
            "Neptune is the outermost planet, an ice giant with the fastest winds in the Solar System.",
            "https://en.wikipedia.org/wiki/Neptune",
        ),
    },
];

/// Keplerian elements of a small body, as published (AU, degrees, days).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbiterRecord {
    pub name: &'static str,
    pub aphelion_au: f64,
    pub perihelion_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub perihelion_argument_deg: f64,
    pub period_days: f64,
    /// Date of the last perihelion passage as `(year, month, day)`, UTC midnight.
    pub last_perihelion: (i32, u32, u32),
    pub radius_miles: f64,
    pub color: [u8; 3],
    pub info: BodyInfo,
}

pub static ORBITERS: [OrbiterRecord; 4] = [
    OrbiterRecord {
        name: "Pluto",
        aphelion_au: 49.305,
        perihelion_au: 29.658,
        eccentricity: 0.2488,
        inclination_deg: 17.16,
        ascending_node_deg: 110.299,
        perihelion_argument_deg: 113.834,
        period_days: 90560.0,
        last_perihelion: (1989, 9, 5),
        radius_miles: 738.0,
        color: [200, 180, 160],
        info: BodyInfo::new(
            "Pluto is a dwarf planet in the Kuiper belt. Its eccentric orbit brings it closer to the sun than Neptune for about twenty years of every orbit.",
            "https://en.wikipedia.org/wiki/Pluto",
        ),
    },
    OrbiterRecord {
        name: "Ceres",
        aphelion_au: 2.9773,
        perihelion_au: 2.5577,
        eccentricity: 0.0758,
        inclination_deg: 10.593,
        ascending_node_deg: 80.305,
        perihelion_argument_deg: 73.597,
        period_days: 1680.5,
        last_perihelion: (2018, 5, 1),
        radius_miles: 292.0,
        color: [170, 170, 170],
        info: BodyInfo::new(
            "Ceres is the largest object in the asteroid belt between Mars and Jupiter, and the only dwarf planet inside Neptune's orbit.",
            "https://en.wikipedia.org/wiki/Ceres_(dwarf_planet)",
        ),
    },
    OrbiterRecord {
        name: "Halley",
        aphelion_au: 35.082,
        perihelion_au: 0.586,
        eccentricity: 0.96714,
        inclination_deg: 162.26,
        ascending_node_deg: 58.42,
        perihelion_argument_deg: 111.33,
        period_days: 27509.0,
        last_perihelion: (1986, 2, 9),
        radius_miles: 3.4,
        color: [200, 230, 255],
        info: BodyInfo::new(
            "Halley's Comet returns to the inner Solar System about every 75 years, on a retrograde orbit.",
            "https://en.wikipedia.org/wiki/Halley%27s_Comet",
        ),
    },
    OrbiterRecord {
        name: "Eris",
        aphelion_au: 97.457,
        perihelion_au: 38.271,
        eccentricity: 0.43607,
        inclination_deg: 44.040,
        ascending_node_deg: 35.951,
        perihelion_argument_deg: 151.639,
        period_days: 203830.0,
        last_perihelion: (1699, 1, 1),
        radius_miles: 722.0,
        color: [235, 235, 235],
        info: BodyInfo::new(
            "Eris is a dwarf planet in the scattered disc, almost as large as Pluto but far more massive.",
            "https://en.wikipedia.org/wiki/Eris_(dwarf_planet)",
        ),
    },
];

/// A nearest-star entry as published: distance in light-years, right ascension
/// as `(h, m, s)`, declination magnitude as `(d, m, s, is_south)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRecord {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub description_source: Option<&'static str>,
    pub distance_ly: f64,
    pub right_ascension: (f64, f64, f64),
    pub declination: (f64, f64, f64, bool),
}

/// A nearest star with its coordinates converted to radians.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStarEntry {
    pub name: &'static str,
    pub info: BodyInfo,
    pub distance_ly: f64,
    /// Right ascension, radians.
    pub right_ascension: f64,
    /// Polar angle from the north celestial pole, radians.
    pub declination: f64,
}

impl NearestStarEntry {
    /// Distance from the sun in base units.
    pub fn distance(&self) -> f64 {
        units::light_years_to_units(self.distance_ly)
    }
}

impl From<&StarRecord> for NearestStarEntry {
    fn from(record: &StarRecord) -> Self {
        let (h, m, s) = record.right_ascension;
        let (d, dm, ds, is_south) = record.declination;
        Self {
            name: record.name,
            info: BodyInfo {
                description: record.description,
                description_source: record.description_source,
            },
            distance_ly: record.distance_ly,
            right_ascension: units::right_ascension_to_radians(h, m, s),
            declination: units::declination_to_radians(d, dm, ds, is_south),
        }
    }
}

/// All nearest stars, converted.
pub fn nearest_stars() -> Vec<NearestStarEntry> {
    NEAREST_STARS.iter().map(NearestStarEntry::from).collect()
}

/// Find a sun/planet entry by name.
pub fn body(name: &str) -> Option<&'static CelestialBody> {
    SOLAR_SYSTEM.iter().find(|b| b.name == name)
}

/// Find a nearest-star record by name.
pub fn star(name: &str) -> Option<&'static StarRecord> {
    NEAREST_STARS.iter().find(|s| s.name == name)
}

pub static NEAREST_STARS: &[StarRecord] = &[
    StarRecord {
        name: "Alpha Centauri",
        description: Some("Alpha Centauri is the nearest star to the Solar System. It is actually three stars locked in orbit, called Alpha Centauri A, B, and C. Alpha Centauri C is a red dwarf, much dimmer than the other two. A and B make Alpha Centauri the brightest star in the Centaurus constellation."),
        description_source: Some("https://en.wikipedia.org/wiki/Alpha_Centauri"),
        distance_ly: 4.2421,
        right_ascension: (14.0, 29.0, 43.0),
        declination: (62.0, 40.0, 46.0, true),
    },
    StarRecord {
        name: "Barnard",
        description: Some("Barnard is a small red dwarf star in the constellation Ophiuchus. It is too dim to be seen with the naked eye."),
        description_source: Some("https://en.wikipedia.org/wiki/Barnard%27s_Star"),
        distance_ly: 5.9630,
        right_ascension: (17.0, 57.0, 48.5),
        declination: (4.0, 41.0, 36.0, false),
    },
    StarRecord {
        name: "Luhman 16",
        description: Some("Luhman 16 is not really a star at all, but a pair of orbiting brown dwarfs. These bodies are too small to be stars, but each one is still about thirty times the mass of Jupiter."),
        description_source: Some("https://en.wikipedia.org/wiki/Luhman_16"),
        distance_ly: 6.59,
        right_ascension: (10.0, 49.0, 15.57),
        declination: (53.0, 29.0, 6.0, true),
    },
    StarRecord {
        name: "Wolf 359",
        description: Some("Wolf 359 is a red dwarf in the constellation Leo. It is invisible to the naked eye, being one of the faintest stars known along with one of the smallest."),
        description_source: Some("https://en.wikipedia.org/wiki/Wolf_359"),
        distance_ly: 7.7825,
        right_ascension: (10.0, 56.0, 29.2),
        declination: (7.0, 0.0, 53.0, false),
    },
    StarRecord {
        name: "Lalande 21185",
        description: Some("Lalande 21185 is a red dwarf in the constellation Ursa Major. It is the brightest red dwarf in the northern hemisphere. However, one still needs at least binoculars or a small telescope to observe this star."),
        description_source: Some("https://en.wikipedia.org/wiki/Lalande_21185"),
        distance_ly: 8.2905,
        right_ascension: (11.0, 3.0, 20.2),
        declination: (35.0, 58.0, 12.0, false),
    },
    StarRecord {
        name: "Sirius",
        description: Some("Sirius is the brightest star in our sky. It is a binary system consisting of Sirius A and Sirius B. Sirius A, which creates most of the light, is twice the mass of our sun. Sirius B, on the other hand, is a white dwarf, the faded core left after a supernova."),
        description_source: Some("https://en.wikipedia.org/wiki/Sirius"),
        distance_ly: 8.5828,
        right_ascension: (6.0, 45.0, 8.9),
        declination: (16.0, 42.0, 58.0, true),
    },
    StarRecord {
        name: "Luyten 726-8",
        description: Some("Star system Luyten 726-8 consists of two stars of very similar brightness. Both are flare stars, occasionally increasing in brightness for a few minutes. Luyten 726-8B is especially remarkable in this respect."),
        description_source: Some("https://en.wikipedia.org/wiki/Luyten_726-8"),
        distance_ly: 8.7280,
        right_ascension: (1.0, 39.0, 1.3),
        declination: (17.0, 57.0, 1.0, true),
    },
    StarRecord {
        name: "Ross 154",
        description: Some("Ross 154 is a red dwarf in the constellation Sagittarius. Although it is the closest star to the sun in its constellation, it is completely invisible to the unaided eye."),
        description_source: Some("https://en.wikipedia.org/wiki/Ross_154"),
        distance_ly: 9.6813,
        right_ascension: (18.0, 49.0, 49.4),
        declination: (23.0, 50.0, 10.0, true),
    },
    StarRecord {
        name: "Ross 248",
        description: Some("Ross 248 is a red dwarf too dim to be seen without visual assistance. It slightly fluctuates in brightness, which is attributed to spots on its photosphere."),
        description_source: Some("https://en.wikipedia.org/wiki/Ross_248"),
        distance_ly: 10.322,
        right_ascension: (23.0, 41.0, 54.7),
        declination: (44.0, 10.0, 30.0, false),
    },
    StarRecord {
        name: "Epsilon Eridani",
        description: Some("Epsilon Eridani is a star residing in the constellation Eridanus. It is somewhat smaller than the sun, and is less than one billion years old. Being still young, its solar wind is thirty times stronger than that of the sun."),
        description_source: Some("https://en.wikipedia.org/wiki/Epsilon_Eridani"),
        distance_ly: 10.522,
        right_ascension: (3.0, 32.0, 55.8),
        declination: (9.0, 27.0, 30.0, true),
    },
    StarRecord {
        name: "Lacaille 9352",
        description: Some("Lacaille 9352 is the closest star in the constellation Piscis Austrinus. However, it is still imperceptible to the naked eye."),
        description_source: Some("https://en.wikipedia.org/wiki/Lacaille_9352"),
        distance_ly: 10.742,
        right_ascension: (23.0, 5.0, 52.0),
        declination: (35.0, 51.0, 11.0, true),
    },
    StarRecord {
        name: "Ross 128",
        description: Some("Ross 128 is a faint red dwarf in the constellation Virgo. It harbors a planet called Ross 128 b, which was the second exoplanet discovered. The roughly Earth-sized planet lies in the habitable zone of the star, and is a prime candidate for life."),
        description_source: Some("https://en.wikipedia.org/wiki/Ross_128"),
        distance_ly: 10.919,
        right_ascension: (11.0, 47.0, 44.4),
        declination: (0.0, 48.0, 16.0, false),
    },
    StarRecord {
        name: "Wise 1506 7027",
        description: Some("Wise 1506 7027 is a sub-stellar brown dwarf in the constellation Ursa Minor."),
        description_source: Some("https://en.wikipedia.org/wiki/WISE_1506%2B7027"),
        distance_ly: 11.089,
        right_ascension: (15.0, 6.0, 49.9),
        declination: (70.0, 27.0, 36.0, false),
    },
    StarRecord {
        name: "Ez Aquarii",
        description: Some("Ez Aquarii is a system of three red dwarfs. Two orbit each other and the third orbits them. All three reside in the constellation Aquarius."),
        description_source: Some("https://en.wikipedia.org/wiki/EZ_Aquarii"),
        distance_ly: 11.266,
        right_ascension: (22.0, 38.0, 33.4),
        declination: (15.0, 17.0, 57.0, true),
    },
    StarRecord {
        name: "Procyon",
        description: Some("Procyon is the brightest star in the constellation Canis Minor and the eighth brightest in the sky. It consists of two white stars, one of which is a faint white dwarf."),
        description_source: Some("https://en.wikipedia.org/wiki/Procyon"),
        distance_ly: 11.402,
        right_ascension: (7.0, 39.0, 18.1),
        declination: (5.0, 13.0, 30.0, false),
    },
    StarRecord {
        name: "61 Cyngi",
        description: Some("61 Cyngi is a pair of orange-colored dwarfs in the Cygnus constellation. In areas with little light polution, the system can be seen with the naked eye."),
        description_source: Some("https://en.wikipedia.org/wiki/61_Cygni"),
        distance_ly: 11.403,
        right_ascension: (21.0, 6.0, 53.9),
        declination: (38.0, 44.0, 58.0, false),
    },
    StarRecord {
        name: "Struve 2398",
        description: Some("Struve 2398 is a binary dwarf star in the constellation Draco. It is invisible without viewing equipment."),
        description_source: Some("https://en.wikipedia.org/wiki/Struve_2398"),
        distance_ly: 11.525,
        right_ascension: (18.0, 42.0, 46.7),
        declination: (59.0, 37.0, 49.0, false),
    },
    StarRecord {
        name: "Groombridge 34",
        description: Some("Groombridge 34 is a binary system of red dwarf stars of the Andromeda constellation. It is moving away from the Solar System relatively fast at 11.6 km/s."),
        description_source: Some("https://en.wikipedia.org/wiki/Groombridge_34"),
        distance_ly: 11.624,
        right_ascension: (0.0, 18.0, 22.9),
        declination: (44.0, 1.0, 23.0, false),
    },
    StarRecord {
        name: "Epsilon Indi",
        description: Some("Epsilon Indi is a triple star system in the constellation of Indus. It contains one orange dwarf and two brown dwarfs. The orange star harbors a gas giant, the closest known outside the Solar System, with 2.7 times the mass of Jupiter."),
        description_source: Some("https://en.wikipedia.org/wiki/Epsilon_Indi"),
        distance_ly: 11.824,
        right_ascension: (22.0, 3.0, 21.7),
        declination: (56.0, 47.0, 10.0, true),
    },
    StarRecord {
        name: "Dx Cancri",
        description: Some("Dx Cancri is a faint red dwarf in the constellation Cancer. It is a flare star, meaning its brightness can increase fivefold for short times."),
        description_source: Some("https://en.wikipedia.org/wiki/DX_Cancri"),
        distance_ly: 11.826,
        right_ascension: (8.0, 29.0, 49.5),
        declination: (26.0, 46.0, 37.0, false),
    },
    StarRecord {
        name: "Tau Ceti",
        description: Some("Tau Ceti is a single star in the constellation Cetus with 78% of the sun's mass. There is evidence that five planets orbit the star, of which two are in the habitable zone. Because of this, Tau Ceti is a candidate for life. However, it is also orbited by a disk of debris, and the resulting higher frequency of impacts would be a barrier for such life."),
        description_source: Some("https://en.wikipedia.org/wiki/Tau_Ceti"),
        distance_ly: 11.887,
        right_ascension: (1.0, 44.0, 4.1),
        declination: (15.0, 56.0, 15.0, true),
    },
    StarRecord {
        name: "GJ 1061",
        description: Some("GJ 1061 is a red dwarf in the Horologium constellation. It is only 0.1% as luminous as the sun."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_1061"),
        distance_ly: 11.991,
        right_ascension: (3.0, 35.0, 59.7),
        declination: (44.0, 30.0, 45.0, true),
    },
    StarRecord {
        name: "Wise 0350-5658",
        description: Some("Wise 0350-5658, a brown dwarf, is the closest system in the constellation Reticulum."),
        description_source: Some("https://en.wikipedia.org/wiki/WISE_0350%E2%88%925658"),
        distance_ly: 12.068,
        right_ascension: (3.0, 50.0, 0.32),
        declination: (56.0, 58.0, 30.2, true),
    },
    StarRecord {
        name: "YZ Ceti",
        description: Some("YZ Ceti is a red dwarf in the Cetus constellation. It is unusually close to its nearest neighbor Tau Ceti at mere 1.6 light years away."),
        description_source: Some("https://en.wikipedia.org/wiki/YZ_Ceti"),
        distance_ly: 12.132,
        right_ascension: (1.0, 12.0, 30.6),
        declination: (16.0, 59.0, 56.0, true),
    },
    StarRecord {
        name: "Luytens Star",
        description: Some("Luyten's Star is a red dwarf in the Canis Minor constellation. Orbiting it are two planets. One of these, called GJ 273b, is a rocky planet larger than Earth. GJ 273b is within the habitable zone, so it could be home to extraterrestrial life."),
        description_source: Some("https://en.wikipedia.org/wiki/Luyten%27s_Star"),
        distance_ly: 12.366,
        right_ascension: (7.0, 27.0, 24.5),
        declination: (5.0, 13.0, 33.0, false),
    },
    StarRecord {
        name: "Teegardens Star",
        description: Some("Teegarden's Star is an invisible red dwarf in the constellation of Aries. The star is moving across the sky at about 1.4E-3 degrees per year, which is extraordinarily fast."),
        description_source: Some("https://en.wikipedia.org/wiki/Teegarden%27s_Star"),
        distance_ly: 12.514,
        right_ascension: (2.0, 53.0, 0.9),
        declination: (16.0, 52.0, 53.0, false),
    },
    StarRecord {
        name: "SCR 1845-6357",
        description: Some("SCR 1845-6357 is a binary system of the Pavo constellation. One star is a red dwarf. The other is a sub-stellar brown dwarf 40-50 times the mass of Jupiter. Being about 50 times fainter than its companion, the brown dwarf was discovered years later."),
        description_source: Some("https://en.wikipedia.org/wiki/SCR_1845-6357"),
        distance_ly: 12.571,
        right_ascension: (18.0, 45.0, 5.3),
        declination: (63.0, 57.0, 48.0, true),
    },
    StarRecord {
        name: "Kapteyns Star",
        description: Some("Kapteyn's Star is a red subdwarf in the constellation Pictor. It harbors two planets. One of them, Kapteyn b, is potentially habitable. This would make the planet the oldest habitable planet known, with an age of about 11 billion years. Kapteyn's Star is visible through binoculars."),
        description_source: Some("https://en.wikipedia.org/wiki/Kapteyn%27s_Star"),
        distance_ly: 12.777,
        right_ascension: (5.0, 11.0, 40.6),
        declination: (45.0, 1.0, 6.0, true),
    },
    StarRecord {
        name: "Lacaille 8760",
        description: Some("Lacaille 8760 is a red dwarf in the Microscopium constellation. The star is one of the brightest red dwarfs known, but is still only visible to the naked eye under exceptional viewing conditions."),
        description_source: Some("https://en.wikipedia.org/wiki/Lacaille_8760"),
        distance_ly: 12.870,
        right_ascension: (21.0, 17.0, 15.3),
        declination: (38.0, 52.0, 3.0, true),
    },
    StarRecord {
        name: "Wise 0535-7500",
        description: Some("Wise 0535-7500 is a pair of bodies in the constellation Mensa. Both are too small for any fusion to occur within them, so they are essentially free-floating planets."),
        description_source: Some("https://en.wikipedia.org/wiki/WISE_0535%E2%88%927500"),
        distance_ly: 13.0,
        right_ascension: (5.0, 35.0, 16.8),
        declination: (75.0, 0.0, 24.9, true),
    },
    StarRecord {
        name: "Kruger 60",
        description: Some("Kruger 60 is a pair of red dwarfs in the Cepheus constellation. The average distance between the two is about the same as the distance between the sun and Saturn. the stars complete one orbit every 44.6 years."),
        description_source: Some("https://en.wikipedia.org/wiki/Kruger_60"),
        distance_ly: 13.149,
        right_ascension: (22.0, 27.0, 59.5),
        declination: (57.0, 41.0, 45.0, false),
    },
    StarRecord {
        name: "DEN 1048 3956",
        description: Some("DEN 1048-3956 is a brown dwarf in the Antlia constellation. It was first detected when it emitted a powerful radio flare."),
        description_source: Some("https://en.wikipedia.org/wiki/DEN_1048%E2%88%923956"),
        distance_ly: 13.167,
        right_ascension: (10.0, 48.0, 14.7),
        declination: (39.0, 56.0, 6.0, true),
    },
    StarRecord {
        name: "UGPS 0722-05",
        description: Some("UGPS 0722-05 is a brown dwarf in the constellation Monoceros about Jupiter's volume."),
        description_source: Some("https://en.wikipedia.org/wiki/UGPS_J0722-0540"),
        distance_ly: 13.259,
        right_ascension: (7.0, 22.0, 27.3),
        declination: (5.0, 40.0, 30.0, true),
    },
    StarRecord {
        name: "Ross 614",
        description: Some("Ross 614 is a binary red dwarf system in the constellation Monoceros. The system is too dim to be seen without the aid of a telescope."),
        description_source: Some("https://en.wikipedia.org/wiki/Ross_614"),
        distance_ly: 13.349,
        right_ascension: (6.0, 29.0, 23.4),
        declination: (2.0, 48.0, 50.0, true),
    },
    StarRecord {
        name: "Wolf 1061",
        description: Some("Wolf 1061 is a red dwarf of the constellation Ophiuchus. It harbors three planets, two of which might be home to life."),
        description_source: Some("https://en.wikipedia.org/wiki/Wolf_1061"),
        distance_ly: 13.820,
        right_ascension: (16.0, 30.0, 18.1),
        declination: (12.0, 39.0, 45.0, true),
    },
    StarRecord {
        name: "Van Maanens Star",
        description: Some("van Maanen's Star resides in the constellation Pisces. It is a dense white dwarf, a remnant left over by a much larger star. It is the closest known white dwarf lacking a companion star."),
        description_source: Some("https://en.wikipedia.org/wiki/Van_Maanen_2"),
        distance_ly: 14.066,
        right_ascension: (0.0, 49.0, 9.9),
        declination: (5.0, 23.0, 19.0, false),
    },
    StarRecord {
        name: "Gliese 1",
        description: Some("Gliese 1 is a red dwarf in the constellation of Sculptor. Its faintness makes it impossible to see with the unaided eye."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_1"),
        distance_ly: 14.231,
        right_ascension: (0.0, 5.0, 24.4),
        declination: (37.0, 21.0, 27.0, true),
    },
    StarRecord {
        name: "Wolf 424",
        description: Some("Wolf 424 is a binary red dwarf system in the Virgo constellation. The stars are two of the dimmest known nearby stars in the sky."),
        description_source: Some("https://en.wikipedia.org/wiki/Wolf_424"),
        distance_ly: 14.312,
        right_ascension: (12.0, 33.0, 17.2),
        declination: (9.0, 1.0, 15.0, false),
    },
    StarRecord {
        name: "2MASS J154043",
        description: Some("2MASS J154043 is a dim red dwarf in the Norma constellation."),
        description_source: Some("https://en.wikipedia.org/wiki/2MASS_J154043.42-510135.7"),
        distance_ly: 14.4,
        right_ascension: (15.0, 40.0, 43.42),
        declination: (51.0, 1.0, 35.7, true),
    },
    StarRecord {
        name: "L 1159-16",
        description: Some("L 1159-16 is a red dwarf in the Aries constellation. It is too faint to be visible without a telescope."),
        description_source: Some("https://en.wikipedia.org/wiki/L_1159-16"),
        distance_ly: 14.509,
        right_ascension: (2.0, 0.0, 13.2),
        declination: (13.0, 3.0, 8.0, false),
    },
    StarRecord {
        name: "Gliese 687",
        description: Some("Gliese 687 is a red dwarf in the constellation of Draco. A moderately sized telescope is required to spot it. Gliese 687 is orbited by a planet about the mass of Neptune."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_687"),
        distance_ly: 14.793,
        right_ascension: (17.0, 36.0, 25.9),
        declination: (68.0, 20.0, 21.0, false),
    },
    StarRecord {
        name: "LHS 292",
        description: Some("LHS 292 resides in the Sextans constellation. Being a faint red dwarf, it can only be seen through a large telescope."),
        description_source: Some("https://en.wikipedia.org/wiki/LHS_292"),
        distance_ly: 14.805,
        right_ascension: (10.0, 48.0, 12.6),
        declination: (11.0, 20.0, 14.0, true),
    },
    StarRecord {
        name: "Gliese 674",
        description: Some("Gliese 674 is a red dwarf in the constellation Ara. A planet about twelve times the mass of Earth orbits the star."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_674"),
        distance_ly: 14.809,
        right_ascension: (17.0, 28.0, 39.9),
        declination: (46.0, 53.0, 43.0, true),
    },
    StarRecord {
        name: "GJ 1245",
        description: Some("GJ 1245 is a system in the Cygnus constellation. It is made of three red dwarfs. Two orbit each other and this binary system orbits another red dwarf."),
        description_source: Some("https://en.wikipedia.org/wiki/GJ_1245"),
        distance_ly: 14.812,
        right_ascension: (19.0, 53.0, 54.2),
        declination: (44.0, 24.0, 55.0, false),
    },
    StarRecord {
        name: "LP 145-141",
        description: Some("LP 145-141 is a white dwarf in the Musca constellation. It is thought to follow a highly eccentric orbit around the galaxy."),
        description_source: Some("https://en.wikipedia.org/wiki/LP_145-141"),
        distance_ly: 15.060,
        right_ascension: (11.0, 45.0, 42.9),
        declination: (64.0, 50.0, 29.0, true),
    },
    StarRecord {
        name: "GJ 1002",
        description: Some("GJ 1002 is a red dwarf in the Cetus constellation. Unlike many red dwarfs, it does not emit any flares."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_1002"),
        distance_ly: 15.313,
        right_ascension: (0.0, 6.0, 43.8),
        declination: (7.0, 32.0, 22.0, true),
    },
    StarRecord {
        name: "Gliese 876",
        description: Some("Gliese 876 is a red dwarf in the Aquarius constellation. It is orbited by four planets. The middle two of these are in the habitable zone of the star, although they are both gas giants. Three of the planets are also in a 1:2:4 resonance. They are the only known example of this phenomenon other than Jupiter's inner three Galilean moons."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_876#Planetary_system"),
        distance_ly: 15.342,
        right_ascension: (22.0, 53.0, 16.7),
        declination: (14.0, 15.0, 49.0, true),
    },
    StarRecord {
        name: "LHS 288",
        description: Some("LHS 288 is normally invisible red dwarf in the constellation Carina. It might have a gaseous planet orbiting it, but this is not confirmed."),
        description_source: Some("https://en.wikipedia.org/wiki/LHS_288"),
        distance_ly: 15.610,
        right_ascension: (10.0, 44.0, 21.2),
        declination: (61.0, 12.0, 36.0, true),
    },
    StarRecord {
        name: "Gliese 412",
        description: Some("Gliese 412 is a dim red dwarf duo thought to form a binary system. The two are part of the constellation Ursa Major."),
        description_source: Some("https://en.wikipedia.org/wiki/Gliese_412"),
        distance_ly: 15.832,
        right_ascension: (11.0, 5.0, 28.6),
        declination: (43.0, 31.0, 36.0, false),
    },
    StarRecord {
        name: "Groombridge 1618",
        description: Some("Groombridge 1618 is a star in the constellation Ursa Major. It is theorized that it has a planetary companion at least four times the mass of Jupiter. If this companion exists, then it is in the habitable zone."),
        description_source: Some("https://en.wikipedia.org/wiki/Groombridge_1618"),
        distance_ly: 15.848,
        right_ascension: (10.0, 11.0, 22.1),
        declination: (49.0, 27.0, 15.0, false),
    },
    StarRecord {
        name: "AD Leonis",
        description: Some("AD Leonis is a red dwarf in the constellation Leo. While red dwarfs can be much older than the sun, AD Leonis is thought to be relatively young, at only 25–300 million years of age."),
        description_source: Some("https://en.wikipedia.org/wiki/AD_Leonis"),
        distance_ly: 15.942,
        right_ascension: (10.0, 19.0, 36.4),
        declination: (19.0, 52.0, 10.0, false),
    },
    StarRecord {
        name: "Denis J081730",
        description: Some("Denis J081730 is a sub-stellar brown dwarf in the Carina constellation. It has a mass fifteen times that of Jupiter."),
        description_source: Some("https://en.wikipedia.org/wiki/DENIS_J081730.0-615520"),
        distance_ly: 16.067,
        right_ascension: (8.0, 17.0, 30.1),
        declination: (61.0, 55.0, 16.0, true),
    },
    StarRecord {
        name: "Gliese 832",
        description: None,
        description_source: None,
        distance_ly: 16.085,
        right_ascension: (21.0, 33.0, 34.0),
        declination: (49.0, 0.0, 32.0, true),
    },
    StarRecord {
        name: "DEN 0255-4700",
        description: None,
        description_source: None,
        distance_ly: 16.197,
        right_ascension: (2.0, 55.0, 3.7),
        declination: (47.0, 0.0, 52.0, true),
    },
    StarRecord {
        name: "GJ 1005",
        description: None,
        description_source: None,
        distance_ly: 16.265,
        right_ascension: (0.0, 15.0, 28.11),
        declination: (16.0, 8.0, 1.6, true),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_solar_system_table() {
        assert_eq!(SOLAR_SYSTEM.len(), 9);
        let sun = body(SUN).unwrap();
        assert!(sun.orbit_radius.is_none());
        for planet in SOLAR_SYSTEM.iter().skip(1) {
            assert!(planet.orbit_radius.unwrap() > sun.radius);
            assert!(planet.period_days.unwrap() > 0.0);
        }
        assert!(body(HOME_PLANET).unwrap().is_home());
        assert!(body("Vulcan").is_none());
    }

    #[test]
    fn test_orbiters_are_closed_ellipses() {
        for o in ORBITERS.iter() {
            assert!(o.eccentricity > 0.0 && o.eccentricity < 1.0, "{}", o.name);
            assert!(o.perihelion_au < o.aphelion_au, "{}", o.name);
            assert!(o.period_days > 0.0, "{}", o.name);
        }
    }

    #[test]
    fn test_star_names_unique() {
        let names: HashSet<_> = NEAREST_STARS.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), NEAREST_STARS.len());
        assert!(NEAREST_STARS.len() >= 50);
    }

    #[test]
    fn test_sirius_conversion() {
        let sirius = NearestStarEntry::from(star("Sirius").unwrap());
        assert_eq!(sirius.distance_ly, 8.5828);
        assert!((sirius.right_ascension - units::right_ascension_to_radians(6.0, 45.0, 8.9)).abs() < 1e-12);
        assert!(sirius.declination > std::f64::consts::FRAC_PI_2);
        assert_eq!(sirius.distance(), 8.5828 * units::LIGHT_YEAR);
    }

    #[test]
    fn test_stars_are_sorted_by_distance() {
        let stars = nearest_stars();
        for pair in stars.windows(2) {
            assert!(pair[0].distance_ly <= pair[1].distance_ly);
        }
    }
}
