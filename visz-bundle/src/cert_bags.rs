//! Raw SafeBag walk over a PKCS#12 store.
//!
//! `p12_keystore` keeps only the certificates it can link to a key or that carry the
//! trusted attribute. A `.visz` store may also hold unrelated roots, and those belong in
//! `<ca>`, so the certificate bags are listed here in store order.

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockCipher, BlockDecrypt, BlockDecryptMut, KeyInit, KeyIvInit};
use cms::cert::x509::spki::AlgorithmIdentifierOwned;
use cms::content_info::{CmsVersion, ContentInfo};
use cms::encrypted_data::EncryptedData;
use der::asn1::{ContextSpecific, OctetString, OctetStringRef};
use der::oid::ObjectIdentifier;
use der::{Decode, Encode, Reader, SliceReader};
use des::TdesEde3;
use p12_keystore::error::Error;
use pkcs12::authenticated_safe::AuthenticatedSafe;
use pkcs12::cert_type::CertBag;
use pkcs12::kdf::{derive_key_utf8, Pkcs12KeyType};
use pkcs12::pfx::Pfx;
use pkcs12::safe_bag::SafeContents;
use pkcs5::pbes2;
use rc2::Rc2;
use sha1::Sha1;

const DATA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");
const ENCRYPTED_DATA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.6");

/// Bags found in a store, in the order they appear.
#[derive(Debug, Default)]
pub(crate) struct StoreBags {
    /// DER of every X.509 certificate bag.
    pub certificates: Vec<Vec<u8>>,
    /// Whether any key bag (plain or shrouded) is present.
    pub has_key: bool,
}

/// List the bags of `pfx_der`, decrypting encrypted safes with `password`.
///
/// The MAC is not checked; callers open the store with `p12_keystore` first.
pub(crate) fn read_store_bags(pfx_der: &[u8], password: &str) -> Result<StoreBags, Error> {
    let pfx = Pfx::from_der(pfx_der)?;
    if pfx.auth_safe.content_type != DATA_OID {
        return Err(Error::UnsupportedContentType);
    }
    let safes = AuthenticatedSafe::from_der(octets(&pfx.auth_safe)?.as_slice())?;

    let mut bags = StoreBags::default();
    for safe in &safes {
        let contents = match safe.content_type {
            DATA_OID => octets(safe)?,
            ENCRYPTED_DATA_OID => decrypt_safe(safe, password)?,
            _ => return Err(Error::UnsupportedContentType),
        };

        for bag in SafeContents::from_der(&contents)? {
            match bag.bag_id {
                pkcs12::PKCS_12_CERT_BAG_OID => {
                    let cert_bag: ContextSpecific<CertBag> =
                        ContextSpecific::from_der(&bag.bag_value)?;
                    if cert_bag.value.cert_id != pkcs12::PKCS_12_X509_CERT_OID {
                        return Err(Error::UnsupportedCertificateType);
                    }
                    bags.certificates
                        .push(cert_bag.value.cert_value.as_bytes().to_vec());
                }
                pkcs12::PKCS_12_KEY_BAG_OID | pkcs12::PKCS_12_PKCS8_KEY_BAG_OID => {
                    bags.has_key = true;
                }
                _ => {}
            }
        }
    }
    Ok(bags)
}

fn octets(info: &ContentInfo) -> Result<Vec<u8>, Error> {
    Ok(OctetString::from_der(&info.content.to_der()?)?
        .as_bytes()
        .to_vec())
}

fn decrypt_safe(info: &ContentInfo, password: &str) -> Result<Vec<u8>, Error> {
    let encrypted = EncryptedData::from_der(&info.content.to_der()?)?;
    if encrypted.version != CmsVersion::V0 {
        return Err(Error::InvalidVersion);
    }
    match &encrypted.enc_content_info.encrypted_content {
        Some(data) => decrypt(
            &encrypted.enc_content_info.content_enc_alg,
            data.as_bytes(),
            password,
        ),
        None => Ok(Vec::new()),
    }
}

fn decrypt(alg: &AlgorithmIdentifierOwned, data: &[u8], password: &str) -> Result<Vec<u8>, Error> {
    let params = alg
        .parameters
        .as_ref()
        .ok_or(Error::InvalidParameters)?
        .to_der()?;

    match alg.oid {
        pbes2::PBES2_OID => pbes2::Parameters::from_der(&params)?
            .decrypt(password.as_bytes(), data)
            .map_err(|err| Error::Pkcs5Error(err.to_string())),
        pkcs12::PKCS_12_PBE_WITH_SHAAND3_KEY_TRIPLE_DES_CBC => {
            let (salt, iterations) = pbe_params(&params)?;
            pbes1_decrypt::<TdesEde3>(data, password, &salt, iterations, 24)
        }
        pkcs12::PKCS_12_PBEWITH_SHAAND40_BIT_RC2_CBC => {
            let (salt, iterations) = pbe_params(&params)?;
            pbes1_decrypt::<Rc2>(data, password, &salt, iterations, 5)
        }
        _ => Err(Error::UnsupportedEncryptionScheme),
    }
}

fn pbe_params(params: &[u8]) -> Result<(Vec<u8>, u64), Error> {
    let mut reader = SliceReader::new(params)?;
    let parsed = reader.sequence(|reader| {
        let salt = OctetStringRef::decode(reader)?.as_bytes().to_vec();
        let iterations: u64 = reader.decode()?;
        Ok((salt, iterations))
    })?;
    Ok(parsed)
}

fn pbes1_decrypt<C>(
    data: &[u8],
    password: &str,
    salt: &[u8],
    iterations: u64,
    key_len: usize,
) -> Result<Vec<u8>, Error>
where
    C: KeyInit + BlockCipher + BlockDecrypt,
{
    let rounds = i32::try_from(iterations).map_err(|_| Error::InvalidParameters)?;
    let key = derive_key_utf8::<Sha1>(password, salt, Pkcs12KeyType::EncryptionKey, rounds, key_len)?;
    let iv = derive_key_utf8::<Sha1>(password, salt, Pkcs12KeyType::Iv, rounds, 8)?;

    cbc::Decryptor::<C>::new_from_slices(&key, &iv)
        .map_err(|_| Error::InvalidLength)?
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| Error::UnpadError)
}
