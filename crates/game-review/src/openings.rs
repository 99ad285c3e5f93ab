//! Opening identification by longest SAN-prefix match.

/// A named opening line. `moves` is a space-joined SAN prefix.
#[derive(Debug, Clone, Copy)]
pub struct Opening {
    pub eco: &'static str,
    pub name: &'static str,
    pub moves: &'static str,
}

pub const COMMON_OPENINGS: &[Opening] = &[
    Opening { eco: "B00", name: "King's Pawn Opening", moves: "e4" },
    Opening { eco: "C20", name: "King's Pawn Game", moves: "e4 e5" },
    Opening { eco: "C40", name: "King's Knight Opening", moves: "e4 e5 Nf3" },
    Opening { eco: "C44", name: "King's Pawn Game", moves: "e4 e5 Nf3 Nc6" },
    Opening { eco: "C50", name: "Italian Game", moves: "e4 e5 Nf3 Nc6 Bc4" },
    Opening { eco: "C50", name: "Italian Game: Giuoco Piano", moves: "e4 e5 Nf3 Nc6 Bc4 Bc5" },
    Opening { eco: "C55", name: "Italian Game: Two Knights Defense", moves: "e4 e5 Nf3 Nc6 Bc4 Nf6" },
    Opening { eco: "C57", name: "Two Knights Defense: Fried Liver Attack", moves: "e4 e5 Nf3 Nc6 Bc4 Nf6 Ng5 d5 exd5 Nxd5 Nxf7" },
    Opening { eco: "C60", name: "Ruy Lopez", moves: "e4 e5 Nf3 Nc6 Bb5" },
    Opening { eco: "C65", name: "Ruy Lopez: Berlin Defense", moves: "e4 e5 Nf3 Nc6 Bb5 Nf6" },
    Opening { eco: "C68", name: "Ruy Lopez: Exchange Variation", moves: "e4 e5 Nf3 Nc6 Bb5 a6 Bxc6" },
    Opening { eco: "C70", name: "Ruy Lopez: Morphy Defense", moves: "e4 e5 Nf3 Nc6 Bb5 a6 Ba4" },
    Opening { eco: "C42", name: "Petrov's Defense", moves: "e4 e5 Nf3 Nf6" },
    Opening { eco: "C25", name: "Vienna Game", moves: "e4 e5 Nc3" },
    Opening { eco: "C30", name: "King's Gambit", moves: "e4 e5 f4" },
    Opening { eco: "C23", name: "Bishop's Opening", moves: "e4 e5 Bc4" },
    Opening { eco: "C21", name: "Danish Gambit", moves: "e4 e5 d4 exd4 c3" },
    Opening { eco: "B20", name: "Sicilian Defense", moves: "e4 c5" },
    Opening { eco: "B27", name: "Sicilian Defense", moves: "e4 c5 Nf3" },
    Opening { eco: "B30", name: "Sicilian Defense: Old Sicilian", moves: "e4 c5 Nf3 Nc6" },
    Opening { eco: "B50", name: "Sicilian Defense", moves: "e4 c5 Nf3 d6" },
    Opening { eco: "B54", name: "Sicilian Defense: Open", moves: "e4 c5 Nf3 d6 d4 cxd4 Nxd4" },
    Opening { eco: "B90", name: "Sicilian Defense: Najdorf Variation", moves: "e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6" },
    Opening { eco: "B70", name: "Sicilian Defense: Dragon Variation", moves: "e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 g6" },
    Opening { eco: "B22", name: "Sicilian Defense: Alapin Variation", moves: "e4 c5 c3" },
    Opening { eco: "B23", name: "Sicilian Defense: Closed", moves: "e4 c5 Nc3" },
    Opening { eco: "C00", name: "French Defense", moves: "e4 e6" },
    Opening { eco: "C02", name: "French Defense: Advance Variation", moves: "e4 e6 d4 d5 e5" },
    Opening { eco: "C03", name: "French Defense: Tarrasch Variation", moves: "e4 e6 d4 d5 Nd2" },
    Opening { eco: "C10", name: "French Defense: Paulsen Variation", moves: "e4 e6 d4 d5 Nc3" },
    Opening { eco: "C01", name: "French Defense: Exchange Variation", moves: "e4 e6 d4 d5 exd5" },
    Opening { eco: "B10", name: "Caro-Kann Defense", moves: "e4 c6" },
    Opening { eco: "B12", name: "Caro-Kann Defense: Advance Variation", moves: "e4 c6 d4 d5 e5" },
    Opening { eco: "B13", name: "Caro-Kann Defense: Exchange Variation", moves: "e4 c6 d4 d5 exd5" },
    Opening { eco: "B15", name: "Caro-Kann Defense: Main Line", moves: "e4 c6 d4 d5 Nc3" },
    Opening { eco: "B01", name: "Scandinavian Defense", moves: "e4 d5" },
    Opening { eco: "B02", name: "Alekhine's Defense", moves: "e4 Nf6" },
    Opening { eco: "B06", name: "Modern Defense", moves: "e4 g6" },
    Opening { eco: "B07", name: "Pirc Defense", moves: "e4 d6 d4 Nf6" },
    Opening { eco: "C45", name: "Scotch Game", moves: "e4 e5 Nf3 Nc6 d4" },
    Opening { eco: "A40", name: "Queen's Pawn Opening", moves: "d4" },
    Opening { eco: "D00", name: "Queen's Pawn Game", moves: "d4 d5" },
    Opening { eco: "D06", name: "Queen's Gambit", moves: "d4 d5 c4" },
    Opening { eco: "D20", name: "Queen's Gambit Accepted", moves: "d4 d5 c4 dxc4" },
    Opening { eco: "D30", name: "Queen's Gambit Declined", moves: "d4 d5 c4 e6" },
    Opening { eco: "D10", name: "Slav Defense", moves: "d4 d5 c4 c6" },
    Opening { eco: "D02", name: "London System", moves: "d4 d5 Nf3 Nf6 Bf4" },
    Opening { eco: "D00", name: "London System", moves: "d4 d5 Bf4" },
    Opening { eco: "A45", name: "Indian Defense", moves: "d4 Nf6" },
    Opening { eco: "E60", name: "King's Indian Defense", moves: "d4 Nf6 c4 g6" },
    Opening { eco: "E20", name: "Nimzo-Indian Defense", moves: "d4 Nf6 c4 e6 Nc3 Bb4" },
    Opening { eco: "E12", name: "Queen's Indian Defense", moves: "d4 Nf6 c4 e6 Nf3 b6" },
    Opening { eco: "D70", name: "Grünfeld Defense", moves: "d4 Nf6 c4 g6 Nc3 d5" },
    Opening { eco: "A56", name: "Benoni Defense", moves: "d4 Nf6 c4 c5" },
    Opening { eco: "A80", name: "Dutch Defense", moves: "d4 f5" },
    Opening { eco: "A10", name: "English Opening", moves: "c4" },
    Opening { eco: "A20", name: "English Opening: King's English", moves: "c4 e5" },
    Opening { eco: "A30", name: "English Opening: Symmetrical", moves: "c4 c5" },
    Opening { eco: "A04", name: "Réti Opening", moves: "Nf3" },
    Opening { eco: "A07", name: "King's Indian Attack", moves: "Nf3 d5 g3" },
    Opening { eco: "A01", name: "Nimzo-Larsen Attack", moves: "b3" },
    Opening { eco: "A00", name: "Bird's Opening", moves: "f4" },
];

/// Longest matching prefix wins. Matching is per whole SAN token, so
/// "e4 e5" never matches a game starting "e4 e6".
pub fn identify_opening(san_line: &str) -> Option<&'static Opening> {
    COMMON_OPENINGS
        .iter()
        .filter(|op| {
            san_line.starts_with(op.moves)
                && (san_line.len() == op.moves.len()
                    || san_line.as_bytes()[op.moves.len()] == b' ')
        })
        .max_by_key(|op| op.moves.len())
}
