use crate::error::Error;

/// The single-byte code page used to decode extended-ASCII strings found in
/// older (pre-extension-block) shell item variants.
///
/// Mirrors `LIBFWSI_CODEPAGES` — every value `parse_item_list` accepts.
/// Constructed from the raw Windows code page number via [`Codepage::try_from_u32`];
/// any other value is rejected with [`Error::UnsupportedCodepage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codepage {
    Ascii,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_11,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Koi8R,
    Koi8U,
    Windows874,
    Windows932,
    Windows936,
    Windows949,
    Windows950,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
}

impl Codepage {
    pub fn try_from_u32(value: u32) -> Result<Codepage, Error> {
        Ok(match value {
            20127 => Codepage::Ascii,
            28591 => Codepage::Iso8859_1,
            28592 => Codepage::Iso8859_2,
            28593 => Codepage::Iso8859_3,
            28594 => Codepage::Iso8859_4,
            28595 => Codepage::Iso8859_5,
            28596 => Codepage::Iso8859_6,
            28597 => Codepage::Iso8859_7,
            28598 => Codepage::Iso8859_8,
            28599 => Codepage::Iso8859_9,
            28600 => Codepage::Iso8859_10,
            28601 => Codepage::Iso8859_11,
            28603 => Codepage::Iso8859_13,
            28604 => Codepage::Iso8859_14,
            28605 => Codepage::Iso8859_15,
            28606 => Codepage::Iso8859_16,
            20866 => Codepage::Koi8R,
            21866 => Codepage::Koi8U,
            874 => Codepage::Windows874,
            932 => Codepage::Windows932,
            936 => Codepage::Windows936,
            949 => Codepage::Windows949,
            950 => Codepage::Windows950,
            1250 => Codepage::Windows1250,
            1251 => Codepage::Windows1251,
            1252 => Codepage::Windows1252,
            1253 => Codepage::Windows1253,
            1254 => Codepage::Windows1254,
            1255 => Codepage::Windows1255,
            1256 => Codepage::Windows1256,
            1257 => Codepage::Windows1257,
            1258 => Codepage::Windows1258,
            other => return Err(Error::UnsupportedCodepage { value: other }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_documented_values() {
        assert_eq!(Codepage::try_from_u32(20127), Ok(Codepage::Ascii));
        assert_eq!(Codepage::try_from_u32(1252), Ok(Codepage::Windows1252));
        assert_eq!(Codepage::try_from_u32(28606), Ok(Codepage::Iso8859_16));
    }

    #[test]
    fn rejects_the_iso_8859_12_gap() {
        assert_eq!(
            Codepage::try_from_u32(28602),
            Err(Error::UnsupportedCodepage { value: 28602 })
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(
            Codepage::try_from_u32(65001),
            Err(Error::UnsupportedCodepage { value: 65001 })
        );
    }
}
