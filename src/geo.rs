//! Country geography for the map view.
//!
//! Names are matched exactly. Countries that are not in the table are left
//! off the map and logged.

use crate::data::views::CountryTotal;

/// Approximate centroid of a country, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

/// A country total positioned on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub country: String,
    pub at: Centroid,
    pub total: f64,
}

/// Country totals split into what can be drawn and what cannot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLayer {
    pub points: Vec<MapPoint>,
    pub unmatched: Vec<String>,
}

impl MapLayer {
    pub fn max_total(&self) -> f64 {
        self.points.iter().map(|p| p.total).fold(0.0, f64::max)
    }

    pub fn min_total(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.total)
            .reduce(f64::min)
            .unwrap_or(0.0)
    }
}

/// Position every country total; unknown names go to `unmatched`.
pub fn map_layer(totals: &[CountryTotal]) -> MapLayer {
    let mut layer = MapLayer::default();
    for t in totals {
        match locate(&t.country) {
            Some(at) => layer.points.push(MapPoint {
                country: t.country.clone(),
                at,
                total: t.total,
            }),
            None => layer.unmatched.push(t.country.clone()),
        }
    }
    if !layer.unmatched.is_empty() {
        log::warn!(
            "{} countries not drawn on the map: {}",
            layer.unmatched.len(),
            layer.unmatched.join(", ")
        );
    }
    layer
}

/// Exact-name lookup.
pub fn locate(country: &str) -> Option<Centroid> {
    COUNTRIES
        .iter()
        .find(|(name, _, _)| *name == country)
        .map(|&(_, lat, lon)| Centroid { lat, lon })
}

#[rustfmt::skip]
const COUNTRIES: &[(&str, f64, f64)] = &[
    ("Afghanistan", 33.9, 67.7),
    ("Albania", 41.2, 20.2),
    ("Algeria", 28.0, 1.7),
    ("American Samoa", -14.3, -170.1),
    ("Andorra", 42.5, 1.6),
    ("Angola", -11.2, 17.9),
    ("Anguilla", 18.2, -63.1),
    ("Antigua and Barbuda", 17.1, -61.8),
    ("Argentina", -38.4, -63.6),
    ("Armenia", 40.1, 45.0),
    ("Aruba", 12.5, -70.0),
    ("Australia", -25.3, 133.8),
    ("Austria", 47.5, 14.6),
    ("Azerbaijan", 40.1, 47.6),
    ("Bahamas", 25.0, -77.4),
    ("Bahrain", 26.0, 50.6),
    ("Bangladesh", 23.7, 90.4),
    ("Barbados", 13.2, -59.5),
    ("Belarus", 53.7, 28.0),
    ("Belgium", 50.5, 4.5),
    ("Belize", 17.2, -88.5),
    ("Benin", 9.3, 2.3),
    ("Bermuda", 32.3, -64.8),
    ("Bhutan", 27.5, 90.4),
    ("Bolivia", -16.3, -63.6),
    ("Bosnia and Herzegovina", 43.9, 17.7),
    ("Botswana", -22.3, 24.7),
    ("Brazil", -14.2, -51.9),
    ("Brunei Darussalam", 4.5, 114.7),
    ("Bulgaria", 42.7, 25.5),
    ("Burkina Faso", 12.2, -1.6),
    ("Burundi", -3.4, 29.9),
    ("Cambodia", 12.6, 105.0),
    ("Cameroon", 7.4, 12.4),
    ("Canada", 56.1, -106.3),
    ("Cape Verde", 16.0, -24.0),
    ("Cayman Islands", 19.3, -81.3),
    ("Central African Republic", 6.6, 20.9),
    ("Chad", 15.5, 18.7),
    ("Chile", -35.7, -71.5),
    ("China", 35.9, 104.2),
    ("Colombia", 4.6, -74.3),
    ("Comoros", -11.9, 43.9),
    ("Congo", -0.2, 15.8),
    ("Cook Islands", -21.2, -159.8),
    ("Costa Rica", 9.7, -83.8),
    ("Cote d'Ivoire", 7.5, -5.5),
    ("Croatia", 45.1, 15.2),
    ("Cuba", 21.5, -77.8),
    ("Cyprus", 35.1, 33.4),
    ("Czech Republic", 49.8, 15.5),
    ("Denmark", 56.3, 9.5),
    ("Djibouti", 11.8, 42.6),
    ("Dominica", 15.4, -61.4),
    ("Dominican Republic", 18.7, -70.2),
    ("Ecuador", -1.8, -78.2),
    ("Egypt", 26.8, 30.8),
    ("El Salvador", 13.8, -88.9),
    ("Equatorial Guinea", 1.7, 10.3),
    ("Eritrea", 15.2, 39.8),
    ("Estonia", 58.6, 25.0),
    ("Ethiopia", 9.1, 40.5),
    ("Faroe Islands", 61.9, -6.9),
    ("Fiji", -17.7, 178.1),
    ("Finland", 61.9, 25.7),
    ("France", 46.2, 2.2),
    ("French Guiana", 3.9, -53.1),
    ("French Polynesia", -17.7, -149.4),
    ("Gabon", -0.8, 11.6),
    ("Gambia", 13.4, -15.3),
    ("Georgia", 42.3, 43.4),
    ("Germany", 51.2, 10.5),
    ("Ghana", 7.9, -1.0),
    ("Gibraltar", 36.1, -5.4),
    ("Greece", 39.1, 21.8),
    ("Greenland", 71.7, -42.6),
    ("Grenada", 12.3, -61.6),
    ("Guadeloupe", 16.3, -61.6),
    ("Guam", 13.4, 144.8),
    ("Guatemala", 15.8, -90.2),
    ("Guernsey", 49.5, -2.6),
    ("Guinea", 9.9, -9.7),
    ("Guinea-Bissau", 11.8, -15.2),
    ("Guyana", 4.9, -58.9),
    ("Haiti", 19.0, -72.3),
    ("Honduras", 15.2, -86.2),
    ("Hong Kong", 22.4, 114.1),
    ("Hungary", 47.2, 19.5),
    ("Iceland", 65.0, -19.0),
    ("India", 20.6, 79.0),
    ("Indonesia", -0.8, 113.9),
    ("Iran", 32.4, 53.7),
    ("Iraq", 33.2, 43.7),
    ("Ireland", 53.4, -8.2),
    ("Isle of Man", 54.2, -4.5),
    ("Israel", 31.0, 34.9),
    ("Italy", 41.9, 12.6),
    ("Jamaica", 18.1, -77.3),
    ("Japan", 36.2, 138.3),
    ("Jersey", 49.2, -2.1),
    ("Jordan", 30.6, 36.2),
    ("Kazakhstan", 48.0, 66.9),
    ("Kenya", -0.0, 37.9),
    ("Kiribati", -3.4, -168.7),
    ("Korea", 35.9, 127.8),
    ("Kuwait", 29.3, 47.5),
    ("Kyrgyz Republic", 41.2, 74.8),
    ("Lao People's Democratic Republic", 19.9, 102.5),
    ("Latvia", 56.9, 24.6),
    ("Lebanon", 33.9, 35.9),
    ("Lesotho", -29.6, 28.2),
    ("Liberia", 6.4, -9.4),
    ("Libyan Arab Jamahiriya", 26.3, 17.2),
    ("Liechtenstein", 47.2, 9.6),
    ("Lithuania", 55.2, 23.9),
    ("Luxembourg", 49.8, 6.1),
    ("Macao", 22.2, 113.5),
    ("Madagascar", -18.8, 46.9),
    ("Malawi", -13.3, 34.3),
    ("Malaysia", 4.2, 102.0),
    ("Maldives", 3.2, 73.2),
    ("Mali", 17.6, -4.0),
    ("Malta", 35.9, 14.4),
    ("Marshall Islands", 7.1, 171.2),
    ("Martinique", 14.6, -61.0),
    ("Mauritania", 21.0, -10.9),
    ("Mauritius", -20.3, 57.6),
    ("Mayotte", -12.8, 45.2),
    ("Mexico", 23.6, -102.6),
    ("Micronesia", 7.4, 150.6),
    ("Moldova", 47.4, 28.4),
    ("Monaco", 43.7, 7.4),
    ("Mongolia", 46.9, 103.8),
    ("Montenegro", 42.7, 19.4),
    ("Montserrat", 16.7, -62.2),
    ("Morocco", 31.8, -7.1),
    ("Mozambique", -18.7, 35.5),
    ("Myanmar", 21.9, 95.9),
    ("Namibia", -22.9, 18.5),
    ("Nauru", -0.5, 166.9),
    ("Nepal", 28.4, 84.1),
    ("Netherlands", 52.1, 5.3),
    ("New Caledonia", -20.9, 165.6),
    ("New Zealand", -40.9, 174.9),
    ("Nicaragua", 12.9, -85.2),
    ("Niger", 17.6, 8.1),
    ("Nigeria", 9.1, 8.7),
    ("Niue", -19.1, -169.9),
    ("North Macedonia", 41.6, 21.7),
    ("Northern Mariana Islands", 17.3, 145.4),
    ("Norway", 60.5, 8.5),
    ("Oman", 21.5, 55.9),
    ("Pakistan", 30.4, 69.3),
    ("Palau", 7.5, 134.6),
    ("Palestinian Territory", 31.9, 35.2),
    ("Panama", 8.5, -80.8),
    ("Papua New Guinea", -6.3, 143.9),
    ("Paraguay", -23.4, -58.4),
    ("Peru", -9.2, -75.0),
    ("Philippines", 12.9, 121.8),
    ("Poland", 51.9, 19.1),
    ("Portugal", 39.4, -8.2),
    ("Puerto Rico", 18.2, -66.6),
    ("Qatar", 25.4, 51.2),
    ("Reunion", -21.1, 55.5),
    ("Romania", 45.9, 25.0),
    ("Russian Federation", 61.5, 105.3),
    ("Rwanda", -1.9, 29.9),
    ("Saint Kitts and Nevis", 17.4, -62.8),
    ("Saint Lucia", 13.9, -61.0),
    ("Saint Vincent and the Grenadines", 12.98, -61.3),
    ("Samoa", -13.8, -172.1),
    ("San Marino", 43.9, 12.5),
    ("Sao Tome and Principe", 0.2, 6.6),
    ("Saudi Arabia", 23.9, 45.1),
    ("Senegal", 14.5, -14.5),
    ("Serbia", 44.0, 21.0),
    ("Seychelles", -4.7, 55.5),
    ("Sierra Leone", 8.5, -11.8),
    ("Singapore", 1.4, 103.8),
    ("Slovakia (Slovak Republic)", 48.7, 19.7),
    ("Slovenia", 46.2, 15.0),
    ("Solomon Islands", -9.6, 160.2),
    ("Somalia", 5.2, 46.2),
    ("South Africa", -30.6, 22.9),
    ("Spain", 40.5, -3.7),
    ("Sri Lanka", 7.9, 80.8),
    ("Sudan", 12.9, 30.2),
    ("Suriname", 3.9, -56.0),
    ("Swaziland", -26.5, 31.5),
    ("Sweden", 60.1, 18.6),
    ("Switzerland", 46.8, 8.2),
    ("Syrian Arab Republic", 34.8, 39.0),
    ("Taiwan", 23.7, 121.0),
    ("Tajikistan", 38.9, 71.3),
    ("Tanzania", -6.4, 34.9),
    ("Thailand", 15.9, 101.0),
    ("Timor-Leste", -8.9, 125.7),
    ("Togo", 8.6, 0.8),
    ("Tokelau", -8.97, -171.9),
    ("Tonga", -21.2, -175.2),
    ("Trinidad and Tobago", 10.7, -61.2),
    ("Tunisia", 33.9, 9.5),
    ("Turkey", 38.96, 35.2),
    ("Turkmenistan", 38.97, 59.6),
    ("Turks and Caicos Islands", 21.7, -71.8),
    ("Tuvalu", -7.1, 177.6),
    ("Uganda", 1.4, 32.3),
    ("Ukraine", 48.4, 31.2),
    ("United Arab Emirates", 23.4, 53.8),
    ("United Kingdom", 55.4, -3.4),
    ("United States of America", 37.1, -95.7),
    ("Uruguay", -32.5, -55.8),
    ("Uzbekistan", 41.4, 64.6),
    ("Vanuatu", -15.4, 166.96),
    ("Venezuela", 6.4, -66.6),
    ("Vietnam", 14.1, 108.3),
    ("Wallis and Futuna", -13.8, -177.2),
    ("Western Sahara", 24.2, -12.9),
    ("Yemen", 15.6, 48.5),
    ("Zambia", -13.1, 27.8),
    ("Zimbabwe", -19.0, 29.2),
];
