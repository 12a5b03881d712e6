//! The 2x2 board: quadrants, squares and their screen regions.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One of the four input targets, numbered 1-4 in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    /// Square 1.
    TopLeft,
    /// Square 2.
    TopRight,
    /// Square 3.
    BottomLeft,
    /// Square 4.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in numbering order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Returns the 1-based square number.
    pub fn number(self) -> u8 {
        match self {
            Quadrant::TopLeft => 1,
            Quadrant::TopRight => 2,
            Quadrant::BottomLeft => 3,
            Quadrant::BottomRight => 4,
        }
    }

    /// Creates a quadrant from its 1-based square number.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Quadrant::TopLeft),
            2 => Some(Quadrant::TopRight),
            3 => Some(Quadrant::BottomLeft),
            4 => Some(Quadrant::BottomRight),
            _ => None,
        }
    }

    /// Returns the zero-based slot in the grid.
    pub fn to_index(self) -> usize {
        usize::from(self.number() - 1)
    }

    /// Label for logs and display.
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "Top-left",
            Quadrant::TopRight => "Top-right",
            Quadrant::BottomLeft => "Bottom-left",
            Quadrant::BottomRight => "Bottom-right",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rectangle in board units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Region {
    /// Creates a region.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A colored input target placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    quadrant: Quadrant,
    color: Rgb,
    region: Region,
    pressed: bool,
}

impl Square {
    /// Which quadrant (and therefore which number) this square occupies.
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// The 1-based square number.
    pub fn number(&self) -> u8 {
        self.quadrant.number()
    }

    /// Fill color.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Screen region, fixed at placement.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Whether the square is currently highlighted.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Error raised when building the grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// All four quadrants are already occupied.
    #[display("Grid already holds four squares")]
    Full,
}

/// The four squares of the board.
///
/// Regions are a pure function of the board dimensions and the order in which
/// squares are added: 1st top-left, 2nd top-right, 3rd bottom-left,
/// 4th bottom-right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    squares: Vec<Square>,
}

impl Grid {
    /// Number of squares a grid holds.
    pub const CAPACITY: usize = 4;

    /// Red, green, blue, yellow.
    pub const CLASSIC_COLORS: [Rgb; 4] = [
        Rgb::new(200, 0, 0),
        Rgb::new(0, 200, 0),
        Rgb::new(0, 0, 200),
        Rgb::new(200, 200, 0),
    ];

    /// Creates an empty grid for a board of the given size.
    #[instrument]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            squares: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Creates a grid populated with the four standard colors.
    #[instrument]
    pub fn classic(width: u32, height: u32) -> Self {
        let mut grid = Self::new(width, height);
        for color in Self::CLASSIC_COLORS {
            let square = grid.place(color);
            grid.squares.push(square);
        }
        grid
    }

    /// Quadrant table: the region assigned to each square number.
    pub fn region_for(&self, quadrant: Quadrant) -> Region {
        let w = self.width / 2;
        let h = self.height / 2;
        match quadrant {
            Quadrant::TopLeft => Region::new(0, 0, w, h),
            Quadrant::TopRight => Region::new(w, 0, w, h),
            Quadrant::BottomLeft => Region::new(0, h, w, h),
            Quadrant::BottomRight => Region::new(w, h, w, h),
        }
    }

    /// Appends a square of the given color and returns the quadrant it was
    /// assigned.
    #[instrument(skip(self))]
    pub fn add_square(&mut self, color: Rgb) -> Result<Quadrant, GridError> {
        if self.squares.len() >= Self::CAPACITY {
            return Err(GridError::Full);
        }
        let square = self.place(color);
        let quadrant = square.quadrant;
        debug!(%quadrant, region = ?square.region, "Square added");
        self.squares.push(square);
        Ok(quadrant)
    }

    fn place(&self, color: Rgb) -> Square {
        // Capacity is checked by the callers.
        let quadrant = Quadrant::ALL[self.squares.len()];
        Square {
            quadrant,
            color,
            region: self.region_for(quadrant),
            pressed: false,
        }
    }

    /// Releases every square.
    pub fn clear(&mut self) {
        for square in &mut self.squares {
            square.pressed = false;
        }
    }

    /// Highlights one square. Returns false if that quadrant has no square.
    pub fn press(&mut self, quadrant: Quadrant) -> bool {
        self.set_pressed(quadrant, true)
    }

    /// Removes the highlight from one square.
    pub fn release(&mut self, quadrant: Quadrant) -> bool {
        self.set_pressed(quadrant, false)
    }

    fn set_pressed(&mut self, quadrant: Quadrant, pressed: bool) -> bool {
        match self.squares.get_mut(quadrant.to_index()) {
            Some(square) => {
                square.pressed = pressed;
                true
            }
            None => false,
        }
    }

    /// Looks up a square.
    pub fn square(&self, quadrant: Quadrant) -> Option<&Square> {
        self.squares.get(quadrant.to_index())
    }

    /// Squares in numbering order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Quadrants currently highlighted.
    pub fn pressed(&self) -> Vec<Quadrant> {
        self.squares
            .iter()
            .filter(|s| s.pressed)
            .map(|s| s.quadrant)
            .collect()
    }

    /// Board width in board units.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height in board units.
    pub fn height(&self) -> u32 {
        self.height
    }
}
