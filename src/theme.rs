use ratatui::style::Color;

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub dim: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub positive: Color,
    pub negative: Color,
    pub accent: Color,
    pub input_accent: Color,
    pub warn: Color,
    pub title: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        lizard()
    }
}

pub fn by_name(name: &str) -> Theme {
    match name {
        "lizard" => lizard(),
        "dark" => dark(),
        "dark-blue" => dark_blue(),
        "dark-violet" => dark_violet(),
        "solarized-dark" => solarized_dark(),
        "solarized-light" => solarized_light(),
        "light" => light(),
        "no-color" => no_color(),
        _ => lizard(),
    }
}

pub const THEME_NAMES: &[&str] = &[
    "lizard",
    "dark",
    "dark-blue",
    "dark-violet",
    "solarized-dark",
    "solarized-light",
    "light",
    "no-color",
];

// -- Themes --

pub fn lizard() -> Theme {
    Theme {
        fg: Color::Indexed(252),        // bright gray-white
        bg: Color::Reset,
        dim: Color::Indexed(243),       // mid gray
        border: Color::Indexed(238),
        highlight_bg: Color::Indexed(236),
        highlight_fg: Color::Indexed(255),
        positive: Color::Indexed(42),   // spring green
        negative: Color::Indexed(203),  // salmon red
        accent: Color::Indexed(49),     // aquamarine
        input_accent: Color::Indexed(222), // gold
        warn: Color::Indexed(214),      // orange
        title: Color::Indexed(42),      // spring green
        error: Color::Indexed(196),
    }
}

pub fn dark() -> Theme {
    Theme {
        fg: Color::Indexed(253),        // bright white
        bg: Color::Reset,
        dim: Color::Indexed(243),       // mid gray
        border: Color::Indexed(240),
        highlight_bg: Color::Indexed(237),
        highlight_fg: Color::Indexed(255),
        positive: Color::Indexed(46),   // vivid green
        negative: Color::Indexed(196),  // vivid red
        accent: Color::Indexed(81),     // sky cyan
        input_accent: Color::Indexed(220), // gold
        warn: Color::Indexed(208),      // dark orange
        title: Color::Indexed(255),
        error: Color::Indexed(196),
    }
}

pub fn dark_blue() -> Theme {
    Theme {
        fg: Color::Indexed(153),        // pale blue-white
        bg: Color::Reset,
        dim: Color::Indexed(60),        // muted blue-gray
        border: Color::Indexed(24),     // dark blue
        highlight_bg: Color::Indexed(17), // deep navy
        highlight_fg: Color::Indexed(231),
        positive: Color::Indexed(49),   // aquamarine
        negative: Color::Indexed(203),  // salmon red
        accent: Color::Indexed(39),     // dodger blue
        input_accent: Color::Indexed(117), // light blue
        warn: Color::Indexed(215),      // sandy orange
        title: Color::Indexed(75),      // cornflower blue
        error: Color::Indexed(203),
    }
}

pub fn dark_violet() -> Theme {
    Theme {
        fg: Color::Indexed(225),        // lavender blush
        bg: Color::Reset,
        dim: Color::Indexed(97),        // medium purple dim
        border: Color::Indexed(54),     // dark purple
        highlight_bg: Color::Indexed(53),
        highlight_fg: Color::Indexed(255),
        positive: Color::Indexed(156),  // pale green
        negative: Color::Indexed(211),  // hot pink light
        accent: Color::Indexed(177),    // orchid
        input_accent: Color::Indexed(183), // plum
        warn: Color::Indexed(216),      // peach
        title: Color::Indexed(141),     // medium purple
        error: Color::Indexed(211),
    }
}

pub fn solarized_dark() -> Theme {
    // base03=#002b36 base02=#073642 base01=#586e75 base0=#839496 base1=#93a1a1
    // yellow=#b58900 orange=#cb4b16 red=#dc322f green=#859900 cyan=#2aa198 blue=#268bd2 violet=#6c71c4
    Theme {
        fg: Color::Indexed(246),        // base0 #839496
        bg: Color::Reset,
        dim: Color::Indexed(240),       // base01 #586e75
        border: Color::Indexed(23),     // base02 #073642
        highlight_bg: Color::Indexed(23),
        highlight_fg: Color::Indexed(230), // base3 #fdf6e3
        positive: Color::Indexed(64),   // green #859900
        negative: Color::Indexed(160),  // red #dc322f
        accent: Color::Indexed(37),     // cyan #2aa198
        input_accent: Color::Indexed(136), // yellow #b58900
        warn: Color::Indexed(136),      // yellow #b58900
        title: Color::Indexed(33),      // blue #268bd2
        error: Color::Indexed(166),     // orange #cb4b16
    }
}

pub fn solarized_light() -> Theme {
    Theme {
        fg: Color::Indexed(240),        // base01 #586e75
        bg: Color::Indexed(230),        // base3 #fdf6e3 (cream)
        dim: Color::Indexed(245),       // base1 #93a1a1
        border: Color::Indexed(187),    // base2 #eee8d5
        highlight_bg: Color::Indexed(187),
        highlight_fg: Color::Indexed(235), // base02
        positive: Color::Indexed(64),   // green
        negative: Color::Indexed(160),  // red
        accent: Color::Indexed(33),     // blue
        input_accent: Color::Indexed(136), // yellow
        warn: Color::Indexed(136),      // yellow
        title: Color::Indexed(37),      // cyan
        error: Color::Indexed(166),     // orange
    }
}

pub fn light() -> Theme {
    Theme {
        fg: Color::Indexed(234),        // near black
        bg: Color::Indexed(231),        // white
        dim: Color::Indexed(246),       // mid gray
        border: Color::Indexed(251),    // light gray
        highlight_bg: Color::Indexed(253),
        highlight_fg: Color::Indexed(232),
        positive: Color::Indexed(28),   // dark green
        negative: Color::Indexed(124),  // dark red
        accent: Color::Indexed(25),     // dark blue
        input_accent: Color::Indexed(130), // dark orange
        warn: Color::Indexed(166),      // burnt orange
        title: Color::Indexed(232),     // black
        error: Color::Indexed(124),
    }
}

pub fn no_color() -> Theme {
    Theme {
        fg: Color::Reset,
        bg: Color::Reset,
        dim: Color::Reset,
        border: Color::Reset,
        highlight_bg: Color::Reset,
        highlight_fg: Color::Reset,
        positive: Color::Reset,
        negative: Color::Reset,
        accent: Color::Reset,
        input_accent: Color::Reset,
        warn: Color::Reset,
        title: Color::Reset,
        error: Color::Reset,
    }
}
