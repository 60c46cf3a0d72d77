// Wed Feb 04 2026 - Alex

pub const TOKEN_DIVISOR: i32 = 256;

pub const LEFT_BRACE: i32 = 1;
pub const RIGHT_BRACE: i32 = 2;
pub const MAC_PARAM: i32 = 6;
pub const LETTER: i32 = 11;
pub const OTHER_CHAR: i32 = 12;
pub const MATCH: i32 = 13;
pub const END_MATCH: i32 = 14;

/// Tokens at or above this value reference a control sequence by slot.
pub const CS_TOKEN_FLAG: i32 = 0x0FFF;

/// A token word split into command code and operand:
/// `command = word div 256`, `operand = word mod 256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub command: i32,
    pub operand: i32,
}

impl Token {
    pub fn new(command: i32, operand: i32) -> Self {
        Self { command, operand }
    }

    pub fn decode(word: i32) -> Self {
        Self {
            command: word.div_euclid(TOKEN_DIVISOR),
            operand: word.rem_euclid(TOKEN_DIVISOR),
        }
    }

    pub fn encode(&self) -> i32 {
        self.command
            .wrapping_mul(TOKEN_DIVISOR)
            .wrapping_add(self.operand)
    }

    pub fn parameter(number: u8) -> Self {
        Self::new(MATCH, i32::from(number))
    }

    pub fn end_parameters() -> Self {
        Self::new(END_MATCH, 0)
    }

    pub fn letter(ch: u8) -> Self {
        Self::new(LETTER, i32::from(ch))
    }

    /// Reference to the control sequence stored at `slot`.
    pub fn control_sequence(slot: i32) -> i32 {
        CS_TOKEN_FLAG.wrapping_add(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_splits_command_and_operand() {
        let token = Token::decode(13 * 256 + 2);
        assert_eq!(token.command, MATCH);
        assert_eq!(token.operand, 2);

        assert_eq!(Token::decode(END_MATCH * 256).command, END_MATCH);
        assert_eq!(Token::decode(0x0FFF + 600).command, 18);
    }

    #[test]
    fn test_decode_negative_word_keeps_operand_in_byte() {
        let token = Token::decode(-1);
        assert_eq!(token.command, -1);
        assert_eq!(token.operand, 255);
    }

    #[test]
    fn test_parameter_tokens() {
        assert_eq!(Token::parameter(3).encode(), 13 * 256 + 3);
        assert_eq!(Token::end_parameters().encode(), 14 * 256);
        assert_eq!(Token::letter(b'x').encode(), 11 * 256 + 120);
    }
}
