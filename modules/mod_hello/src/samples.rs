//! Fixed byte material lifted from a captured browser ClientHello.
//!
//! None of this is generated per call: the random, session id, cipher list and
//! key shares are frozen so every run emits byte-identical messages and the
//! write boundary lands on the same offset each time.

use crate::error::EncodeError;

/// ClientHello body up to (not including) the extensions block: legacy_version,
/// random, legacy_session_id, cipher_suites, compression_methods.
pub(crate) const CLIENT_HELLO_PREFIX: &str = concat!(
    "030381bd99579ae1430858bb32549d4d3d53fbd49946fc76eb1627db73f36a71",
    "ce8220a1faacf5f53904ca5399c27b7e9816b110dbea157856572c942bf2314d",
    "3256240022130113021303c02bc02fc02cc030cca9cca8c009c013c00ac01400",
    "9c009d002f00350100",
);

/// Sample X25519 public key (32 bytes).
pub(crate) const X25519_KEY: &str = concat!(
    "53db02a3c0178ceef2d76cab96e45160a0e934a3122989edb7f1972f28e0e241",
);

/// Sample X25519Kyber768Draft00 key share: X25519 key followed by a Kyber768
/// public key (1216 bytes).
pub(crate) const X25519_KYBER768_KEY: &str = concat!(
    "8b782040433f595488fcfccb1f9e708f669409b4026129290a605b79e3fbf704",
    "ad414f5d17586ac6c1057bad1f89b48c9a00e4b01ecf929dfd341339b0556440",
    "039af86ba17a58fb9797d9d993f2b586a4c80a6b1b031fa8c36cd97757d4536d",
    "446ef6da428d38b3f4ab585b3202155519b9c4391505940a1566152b76f53903",
    "c2c3b5e5f2a67d0041c2206eb524182880097e3ca636424baac29db08151e4b6",
    "2cc6aa15ca5b67890b5cb1c63091772fdef29bb81815f4e2c871f736bcf04bac",
    "4a8650a091b769359909b436c81348aba3b2b815699048df605a8c124e184327",
    "8ea5cdc1369d80949e0798b6544a599eb8a02b583b7e82115fb0c7430c925a79",
    "19b9dab7dbe85c8e799ca033ab18da6e1d5b3da8facf9b4b63e478100dc274a2",
    "8138751992222459a1317bd146bc5e34b346c99e17a8ad3558734dc993844c83",
    "e7e6b5edec11b8249f54cb84ee36253682a90f951829b8b55a54409a62459514",
    "1eeb9b9da2162b00c6436459753b087782f828e56c4cad226811d810df804262",
    "aa9f4c371799b27e9725830868859075506c364ad02518dd61c798651534b7a0",
    "51f815bc8912b9b60efad57fb9a71f0eb422d731cc6df706e03ab8bc6988d8b6",
    "854002ce18f98ac16069a63054cdc8c6a5b264c8a144f1b1b3beb7818d48b383",
    "72905df2002120c7d26258c13a3f06d08e8b4a0227f27945119598a6642d52ab",
    "1fa02b715b080dd92a66aa072d61b31782bcb19513ac593098dc306ae81eb313",
    "42c4fba821f056552729ca70b9ebfcbcb27a2f9e169374987b83b73107918cbe",
    "467a8ca82ded47618967ad87d85ac1bb5fd318cb647bc68b397b3cb50fca1a7c",
    "97641ec09c36f3eb2e500a63c201c83f3a9a468207deec2ffa59c715f52541a1",
    "142f679ee485c9c1f5601ad84bf3b01e6ad7918ce3c7be0a995248a8bb27756b",
    "874985e62b845994d5c037ce8855fd75627dc0a0b2a8c9b29a01015c9276e2ca",
    "ac5918febb1652e90e6d39ce6fe46693cb8d2baa44896a55ff24713816ad82b5",
    "ce125c34fd1413f33b138df997c9b5cdee78b2ab09220384adb9816fd7527e5b",
    "27bb1132a76d8a8c6406884bd916178c984e2877dae1871c39cd566a56e07540",
    "8b00c23bc739fe521a217b00054b0c86e8094ff4af9687cbf403165fb4989dd0",
    "47efc5b9e71a277070c4a2a98aaba08d57b0515f71bcfbfa5eeca892c569a95b",
    "180fdc393d79dc045ed459df6218df093c9f328a17c15717793d8822cf31b07a",
    "c6c9a8b0ac2b2e28bbaeecbe365036d88c3d9429b45c6191dd5529433abaebf8",
    "03d6572b9517cf8ec39d8388a17f20b9e9517b3a199325f2936f79ccadf02b90",
    "c609ee46b74c911cd3c8c45d9066af029845b018644460643a8b4123cf617137",
    "99fa40f11708f427253829b2f6288d301220d112567a865f284c6b98c98fea3a",
    "9b5251bf8ed39d6ee776f95348ef279be22701b6b4a602d39b416c0d42512b68",
    "437b72845d3272cb3b7c30d696abb3410c7e400afd563f4825bd648275984232",
    "68b42ee6753f7f997329aa82f8e2517b0987cac18ae3f65ca556783b6308b888",
    "3553f29ea0233ca2c60d9dcc0bf4abc36c41b7bbeaacc7b78007a35a9afcb398",
    "fa863ca3175ea1cd7c75c86db7bb81f552f6c472a62439e326c933bcacfff364",
    "e9b1b2bbabc637ff00116e3f1ecce8a68ebbb2edd867a3ce351831d999d38d11",
);

/// extended_master_secret, renegotiation_info, ec_point_formats, session_ticket,
/// signature_algorithms, psk_key_exchange_modes and supported_versions, already encoded.
pub(crate) const AUXILIARY_EXTENSIONS: &str = concat!(
    "00170000ff01000100000b0002010000230000000d0014001204030804040105",
    "0308050501080606010201002d00020101002b0009080304030303020301",
);

fn decode(name: &'static str, text: &str) -> Result<Vec<u8>, EncodeError> {
    hex::decode(text).map_err(|source| EncodeError::Template { name, source })
}

pub fn client_hello_prefix() -> Result<Vec<u8>, EncodeError> {
    decode("CLIENT_HELLO_PREFIX", CLIENT_HELLO_PREFIX)
}

pub fn x25519_key() -> Result<Vec<u8>, EncodeError> {
    decode("X25519_KEY", X25519_KEY)
}

pub fn x25519_kyber768_key() -> Result<Vec<u8>, EncodeError> {
    decode("X25519_KYBER768_KEY", X25519_KYBER768_KEY)
}

pub fn auxiliary_extensions() -> Result<Vec<u8>, EncodeError> {
    decode("AUXILIARY_EXTENSIONS", AUXILIARY_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sizes() {
        assert_eq!(client_hello_prefix().unwrap().len(), 105);
        assert_eq!(x25519_key().unwrap().len(), 32);
        assert_eq!(x25519_kyber768_key().unwrap().len(), 1216);
        assert_eq!(auxiliary_extensions().unwrap().len(), 62);
    }

    #[test]
    fn test_prefix_starts_with_tls12_version() {
        let prefix = client_hello_prefix().unwrap();
        assert_eq!(&prefix[..2], &[0x03, 0x03]);
        // 32-byte session id follows the 32-byte random
        assert_eq!(prefix[34], 32);
    }

    #[test]
    fn test_bad_template_is_reported() {
        let err = decode("BROKEN", "0g").unwrap_err();
        assert!(matches!(err, EncodeError::Template { name: "BROKEN", .. }));
    }
}
