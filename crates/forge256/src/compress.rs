// SHA-256 compression function (FIPS 180-4, section 6.2.2 steps 2-4)

use crate::consts::{K, SCHEDULE_WORDS, STATE_WORDS};

#[inline]
fn big_sigma0(a: u32) -> u32 {
    a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22)
}

#[inline]
fn big_sigma1(e: u32) -> u32 {
    e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25)
}

/// Each bit of `e` chooses between the bits of `f` and `g`.
#[inline]
fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

/// Bitwise majority of `a`, `b`, `c`.
#[inline]
fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Runs the 64 compression rounds for one block and folds the result into `state`.
///
/// The working variables live only for the duration of this call; `state`
/// is touched once, after the last round. Blocks must be fed in message
/// order since each call depends on the state left by the previous one.
pub fn compress(state: &mut [u32; STATE_WORDS], w: &[u32; SCHEDULE_WORDS]) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (&k, &wt) in K.iter().zip(w.iter()) {
        let temp1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(k)
            .wrapping_add(wt);
        let temp2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(temp1);
        d = c;
        c = b;
        b = a;
        a = temp1.wrapping_add(temp2);
    }

    for (word, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(v);
    }
}
