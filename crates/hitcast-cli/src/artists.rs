//! The artist list the harvest runs against.

/// Thirty hip-hop artists spanning eras and popularity tiers, so the
/// harvested dataset is not dominated by one generation's release style.
pub const DEFAULT_ARTISTS: &[&str] = &[
    "Kendrick Lamar",
    "Drake",
    "J. Cole",
    "Kanye West",
    "Travis Scott",
    "Nicki Minaj",
    "Cardi B",
    "Megan Thee Stallion",
    "Eminem",
    "Jay-Z",
    "Nas",
    "Lil Wayne",
    "Future",
    "21 Savage",
    "Tyler, The Creator",
    "A$AP Rocky",
    "Lil Baby",
    "Gunna",
    "Doja Cat",
    "Outkast",
    "Missy Elliott",
    "Snoop Dogg",
    "Ice Cube",
    "50 Cent",
    "The Notorious B.I.G.",
    "2Pac",
    "Mos Def",
    "MF DOOM",
    "Run The Jewels",
    "Denzel Curry",
];
