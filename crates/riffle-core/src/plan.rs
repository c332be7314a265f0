//! Exact-permutation shuffle planning
//!
//! Draws a uniform random permutation and translates it into the minimal
//! sequence of single-item moves that realizes it against a remote sequence
//! which shifts after every move. Positions are never stable across moves,
//! so each move is derived against a local mirror of the current order
//! (simulate-and-translate) rather than the original snapshot.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::service::Anchor;


/// A single relocate-one-element instruction.
///
/// `from` and `to` are positions in the sequence *as it stands when this
/// move is issued*, i.e. after all earlier moves in the same plan have been
/// applied. The anchor is derived from them at emission time.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Move {
    pub from: usize,
    pub to: usize,
    pub anchor: Anchor,
}


impl Move {
    /// Creates a move from current-position source and destination.
    pub fn new( from: usize, to: usize ) -> Self {
        // Moving backward inserts before the destination, moving forward
        // inserts after it.
        let anchor = if to < from {
            Anchor::Before( to )
        } else {
            Anchor::After( to )
        };

        Self { from, to, anchor }
    }
}


/// Draws a uniform random permutation of `[0, n)`.
///
/// The result is the desired final order: the track currently at old
/// position `order[j]` should end up at new position `j`.
pub fn shuffled_order<R: Rng>( rng: &mut R, n: usize ) -> Vec<usize> {
    let mut order: Vec<usize> = ( 0..n ).collect();
    order.shuffle( rng );
    order
}


/// Applies the remote service's splice rule to a local sequence.
///
/// A move removes the element at `from` and reinserts it at `to`, shifting
/// every element between the two positions by one. Test models and the
/// planner mirror share this single definition.
pub fn apply_move<T>( seq: &mut Vec<T>, from: usize, to: usize ) {
    let item = seq.remove( from );
    seq.insert( to, item );
}


/// Translates a target permutation into a sequence of moves.
///
/// Walks destinations left to right, keeping a mirror array of the live
/// order. For each destination `j`, the element that must land there is
/// located in the mirror at its *current* position; a move is emitted only
/// when that position differs from `j`, and the mirror is spliced exactly
/// like the remote service will be. Emitting static (old, new) pairs from
/// the original snapshot instead would be wrong as soon as a second move
/// executes.
///
/// @param order - Target permutation; `order[j]` is the old position of the
///                element that must end at `j`
///
/// @returns Moves to issue in order, empty for the identity permutation
pub fn plan_moves( order: &[usize] ) -> Vec<Move> {
    let n = order.len();
    let mut mirror: Vec<usize> = ( 0..n ).collect();
    let mut moves = Vec::new();

    for ( dest, &wanted ) in order.iter().enumerate() {
        // Everything left of dest is already final, so the wanted element
        // can only sit at dest or to its right.
        let src = match mirror[ dest.. ].iter().position( |&orig| orig == wanted ) {
            Some( offset ) => dest + offset,
            None => continue, // not a permutation; nothing sane to emit
        };

        if src == dest {
            continue;
        }

        moves.push( Move::new( src, dest ) );
        apply_move( &mut mirror, src, dest );
    }

    moves
}


#[cfg( test )]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;


    /// Applies a plan to a model sequence using the shared splice rule.
    fn run_plan<T>( seq: &mut Vec<T>, moves: &[Move] ) {
        for m in moves {
            apply_move( seq, m.from, m.to );
        }
    }


    #[test]
    fn test_identity_produces_no_moves() {
        let order: Vec<usize> = ( 0..20 ).collect();
        assert!( plan_moves( &order ).is_empty() );
    }


    #[test]
    fn test_empty_and_singleton() {
        assert!( plan_moves( &[] ).is_empty() );
        assert!( plan_moves( &[0] ).is_empty() );
    }


    #[test]
    fn test_worked_example() {
        // [A,B,C,D,E] with target [C,A,D,B,E]: move C to 0, skip A,
        // move D to 2, done. Exactly two moves.
        let order = vec![ 2, 0, 3, 1, 4 ];
        let moves = plan_moves( &order );
        assert_eq!( moves.len(), 2 );
        assert_eq!( ( moves[0].from, moves[0].to ), ( 2, 0 ) );
        assert_eq!( ( moves[1].from, moves[1].to ), ( 3, 2 ) );

        let mut seq = vec![ 'A', 'B', 'C', 'D', 'E' ];
        run_plan( &mut seq, &moves );
        assert_eq!( seq, vec![ 'C', 'A', 'D', 'B', 'E' ] );
    }


    #[test]
    fn test_plan_realizes_permutation_exactly() {
        let mut rng = StdRng::seed_from_u64( 0xD1CE );

        for n in [ 0, 1, 2, 3, 5, 17, 64, 200 ] {
            let order = shuffled_order( &mut rng, n );
            let moves = plan_moves( &order );

            let mut seq: Vec<usize> = ( 0..n ).collect();
            run_plan( &mut seq, &moves );

            let expected: Vec<usize> = order.clone();
            assert_eq!( seq, expected, "n = {}", n );
        }
    }


    #[test]
    fn test_reversal() {
        let order = vec![ 4, 3, 2, 1, 0 ];
        let moves = plan_moves( &order );

        let mut seq = vec![ 0, 1, 2, 3, 4 ];
        run_plan( &mut seq, &moves );
        assert_eq!( seq, vec![ 4, 3, 2, 1, 0 ] );

        // A full reversal needs n - 1 moves, never more.
        assert_eq!( moves.len(), 4 );
    }


    #[test]
    fn test_anchor_direction() {
        let backward = Move::new( 7, 2 );
        assert_eq!( backward.anchor, Anchor::Before( 2 ) );

        let forward = Move::new( 2, 7 );
        assert_eq!( forward.anchor, Anchor::After( 7 ) );
    }


    #[test]
    fn test_splice_touches_only_the_span() {
        let mut seq = vec![ 0, 1, 2, 3, 4, 5, 6, 7 ];
        apply_move( &mut seq, 5, 2 );

        // Outside [2, 5] nothing moved.
        assert_eq!( &seq[ ..2 ], &[ 0, 1 ] );
        assert_eq!( &seq[ 6.. ], &[ 6, 7 ] );
        assert_eq!( &seq[ 2..=5 ], &[ 5, 2, 3, 4 ] );
    }


    #[test]
    fn test_shuffled_order_is_permutation() {
        let mut rng = StdRng::seed_from_u64( 42 );
        let order = shuffled_order( &mut rng, 100 );

        let mut seen = vec![ false; 100 ];
        for &i in &order {
            assert!( !seen[i] );
            seen[i] = true;
        }
    }


    #[test]
    fn test_seeded_order_is_deterministic() {
        let a = shuffled_order( &mut StdRng::seed_from_u64( 7 ), 50 );
        let b = shuffled_order( &mut StdRng::seed_from_u64( 7 ), 50 );
        assert_eq!( a, b );
    }
}
