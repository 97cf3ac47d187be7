//! Provides the zones of the Japanese Plane Rectangular Coordinate System.
//!
//! 平面直角座標系（第1系〜第19系）の原点を提供します。
//!
//! Every zone is a transverse Mercator projection on GRS80 (JGD2011)
//! with its own origin and the common scale factor [`SCALE_FACTOR`].
use std::error::Error;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::Serialize;

/// The scale factor on the central meridian, common to all the zones.
pub const SCALE_FACTOR: f64 = 0.9999;

/// Represents a zone (系) of the plane rectangular coordinate system.
///
/// # Example
///
/// ```
/// # use sokuryo::zone::Zone;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let zone = Zone::try_from_id(9)?;
/// assert_eq!(zone.id(), 9);
/// assert_eq!(zone.origin_latitude(), 36.0);
/// assert!((zone.origin_longitude() - 139.83333333333334).abs() < 1e-12);
/// assert_eq!(zone.epsg(), 6677);
/// assert_eq!(zone.name(), "第9系");
///
/// assert!(Zone::try_from_id(0).is_err());
/// assert!(Zone::try_from_id(20).is_err());
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Zone {
    id: u8,
    /// \[deg\]
    origin_latitude: f64,
    /// \[deg\]
    origin_longitude: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    region: &'static str,
}

macro_rules! zone {
    ($id:literal, $lat:literal, ($deg:literal, $min:literal), $region:literal) => {
        Zone {
            id: $id,
            origin_latitude: $lat,
            origin_longitude: $deg + $min / 60.0,
            region: $region,
        }
    };
}

/// All the zones, `ZONES[i]` is the zone `i + 1`.
pub const ZONES: [Zone; 19] = [
    zone!(1, 33.0, (129.0, 30.0), "長崎、鹿児島"),
    zone!(2, 33.0, (131.0, 0.0), "福岡、佐賀、熊本、大分、宮崎、鹿児島"),
    zone!(3, 36.0, (132.0, 10.0), "山口、島根、広島"),
    zone!(4, 33.0, (133.0, 30.0), "香川、愛媛、徳島、高知"),
    zone!(5, 36.0, (134.0, 20.0), "兵庫、鳥取、岡山"),
    zone!(6, 36.0, (136.0, 0.0), "京都、大阪、福井、滋賀、三重、奈良、和歌山"),
    zone!(7, 36.0, (137.0, 10.0), "石川、富山、岐阜、愛知"),
    zone!(8, 36.0, (138.0, 30.0), "新潟、長野、山梨、静岡"),
    zone!(9, 36.0, (139.0, 50.0), "東京、福島、栃木、茨城、埼玉、千葉、群馬、神奈川"),
    zone!(10, 40.0, (140.0, 50.0), "青森、秋田、山形、岩手、宮城"),
    zone!(11, 44.0, (140.0, 15.0), "北海道(渡島・檜山・後志・胆振)"),
    zone!(12, 44.0, (142.0, 15.0), "北海道(石狩・空知・上川・留萌・宗谷)"),
    zone!(13, 44.0, (144.0, 15.0), "北海道(日高・十勝・釧路・根室・網走)"),
    zone!(14, 26.0, (142.0, 0.0), "小笠原諸島"),
    zone!(15, 26.0, (127.0, 30.0), "沖縄本島"),
    zone!(16, 26.0, (124.0, 0.0), "沖縄(宮古・八重山)"),
    zone!(17, 26.0, (131.0, 0.0), "沖縄(大東諸島)"),
    zone!(18, 20.0, (136.0, 0.0), "沖ノ鳥島"),
    zone!(19, 26.0, (154.0, 0.0), "南鳥島"),
];

impl TryFrom<u8> for &'static Zone {
    type Error = InvalidZoneError;

    /// see [`Zone::try_from_id()`]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Zone::try_from_id(value)
    }
}

impl Zone {
    /// Returns the zone numbered `id`.
    ///
    /// # Errors
    ///
    /// If `id` is not in 1..=19.
    #[inline]
    pub fn try_from_id(id: u8) -> Result<&'static Zone, InvalidZoneError> {
        match id {
            1..=19 => Ok(&ZONES[id as usize - 1]),
            _ => Err(InvalidZoneError::new(id)),
        }
    }

    /// Returns an iterator over all the zones, in order of the number.
    pub fn iter() -> impl Iterator<Item = &'static Zone> {
        ZONES.iter()
    }

    /// Returns the number of the zone, 1 to 19.
    #[inline]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Returns the latitude \[deg\] of the origin.
    #[inline]
    pub const fn origin_latitude(&self) -> f64 {
        self.origin_latitude
    }

    /// Returns the longitude \[deg\] of the origin, namely, the central meridian.
    #[inline]
    pub const fn origin_longitude(&self) -> f64 {
        self.origin_longitude
    }

    /// Returns the scale factor on the central meridian, [`SCALE_FACTOR`].
    #[inline]
    pub const fn scale_factor(&self) -> f64 {
        SCALE_FACTOR
    }

    /// Returns the EPSG code of the zone on JGD2011, EPSG:6669 to EPSG:6687.
    #[inline]
    pub const fn epsg(&self) -> u16 {
        6668 + self.id as u16
    }

    /// Returns the Japanese name, e.g. `第9系`.
    pub fn name(&self) -> String {
        format!("第{}系", self.id)
    }

    /// Returns the prefectures (or islands) the zone covers.
    #[inline]
    pub const fn region(&self) -> &'static str {
        self.region
    }
}

/// An error which can be returned when the zone number is not in 1 to 19.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct InvalidZoneError {
    zone: u8,
}

impl InvalidZoneError {
    #[cold]
    pub(crate) const fn new(zone: u8) -> Self {
        Self { zone }
    }

    /// Returns the rejected zone number.
    pub const fn zone(&self) -> u8 {
        self.zone
    }
}

impl Error for InvalidZoneError {}

impl Display for InvalidZoneError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "invalid zone: {}, must satisfy 1 <= and <= 19", self.zone)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_try_from_id() {
        for id in 1..=19 {
            let zone = Zone::try_from_id(id).unwrap();
            assert_eq!(zone.id(), id);
            assert_eq!(zone.scale_factor(), 0.9999);
        }

        assert_eq!(Zone::try_from_id(0), Err(InvalidZoneError::new(0)));
        assert_eq!(Zone::try_from_id(20), Err(InvalidZoneError::new(20)));
        assert_eq!(Zone::try_from_id(u8::MAX).unwrap_err().zone(), u8::MAX);

        let zone: &Zone = 3_u8.try_into().unwrap();
        assert_eq!(zone.id(), 3);
    }

    #[test]
    fn test_origin() {
        let cases = [
            (1, 33.0, 129.5),
            (3, 36.0, 132.1666666666667),
            (5, 36.0, 134.3333333333333),
            (7, 36.0, 137.1666666666667),
            (9, 36.0, 139.8333333333333),
            (10, 40.0, 140.8333333333333),
            (11, 44.0, 140.25),
            (18, 20.0, 136.0),
            (19, 26.0, 154.0),
        ];

        for (id, lat, lng) in cases {
            let zone = Zone::try_from_id(id).unwrap();
            assert_eq!(zone.origin_latitude(), lat, "{id}");
            assert!((zone.origin_longitude() - lng).abs() < 1e-12, "{id}");
        }
    }

    #[test]
    fn test_epsg_and_name() {
        assert_eq!(Zone::try_from_id(1).unwrap().epsg(), 6669);
        assert_eq!(Zone::try_from_id(19).unwrap().epsg(), 6687);
        assert_eq!(Zone::try_from_id(12).unwrap().name(), "第12系");
        assert_eq!(Zone::try_from_id(14).unwrap().region(), "小笠原諸島");
    }

    #[test]
    fn test_iter() {
        let ids = Zone::iter().map(Zone::id).collect::<Vec<_>>();
        assert_eq!(ids, (1..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_display_error() {
        assert_eq!(
            InvalidZoneError::new(0).to_string(),
            "invalid zone: 0, must satisfy 1 <= and <= 19"
        );
    }
}
