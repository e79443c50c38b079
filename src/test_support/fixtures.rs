//! Fixed keys and JWE vectors produced by an independent JOSE implementation.
//!
//! Every `*_JWE` below decrypts with the key named in its doc comment.

pub const RSA_JWK: &str = r#"{"kty":"RSA","kid":"rsa-1","n":"1MAgFf7XTGr40cvBmvmpNi8dWavLgaPDkr0Uuvjb2dfU3gzhKXXr2tSJskEbtDmHdx5Nd91bioN25goglfhOXwsh0Z3CAtLJqoL79Lo4UbX0gql2XpQE8VBsQfb3X5DkSVn5dIHoMZnibQ6obMDrRuhpcxLg_mzAiumUi47wiUSxjct4ZwbiJMBEsEI2tUKKofp3Rj4Di9R53do61XBhMbp7ll4j9mT0jCN0VNL4PK_68sCW76iy-HugGmK1GUfCbB3zb2EkgpOTBhIqya9PJoASEvE520U3ax7lwdpXtnwH5BdQupATzgTLjmvtJ8hMgjXMxmcUUPATsNbEzgcbIw","e":"AQAB","d":"MDNXEaSrIqUZum5vbq0hqSUDgU1qzfRMWvJ7v-Ch7rj3gVdpq_sLdIiyqbAWlr5x8orrAj0kgD1IstWYjGG1X9Ml1lfnnLwk9Hy4mLmYCOswemnqZ4Mhm4qc_FT3tq8dCYFZAwxrjtFOe2bWwczzgR0mxuuADiSVeuNwxC2eUXrUkFjki5FscjVuNpkBe3J6c2ohT2855e9-7-nvopS3-1hTvyID_04sCKy3Rm-cOWN63LvL-ljZ-wSNcwkROMXj7TRaByQEjqbU8FhxxezCTrYNI2byijEm24Onnlz8FUUzgOtGfJuE8ILFsS74dcObfeYp3HN-8qaduLjmH7yh","p":"_4c7UY2xsmkt-P6AJLTBNsVVkl3WHUW7EbuGeRyphGgtRLe3xX5bvohlmTicyJaLxqcYdbWQ4D8rxtsBQDJKvt5bjsifZ3-O9CJVXZ-tOWR8YaooprHJQK6yLPd9pOxVEQ97BAV29BxDL6m_25U52Vg_mr6bDImZ6tIxoQU2Gyk","q":"1SStCG1eJtetUqjOWEUgZfeZgJrhHi9RDAGfWcgmZ4t6Mg0r1REaHnLDX77aAJjnt5opooAUKY3AQR3jlxPUy4AZcN32gI1N8CUpdF1YAxPNI9UgeO99UzUSL2BaCRh5kk-qhEuvKoV8Qri6zIZ8f0afcOHGCm5pvUt_FzjE2Ws","dp":"SvxETApouxJii08kC6F_kbMXCXy_-Jcd7nY5YBEpLdHkduXy5-HMynz8U5ppZ_PF0OX4J5LAkQ34qsJZ-5zGknxuIdh97sFgEgSBSJgzHUR_u6lThJdnl7OsVcXK-TrhO8BvOR7haYFhtfr6clW4RC_Beoe0uFko8d_88GO3HQE","dq":"jF-9PeGZsoc09U2LqILOVZl-FT7rqE-NVxTyd9TjxioL7k7SYV8EDq2SkspFFUOeyELVzNoBbWSYC8q9i1BaQzQ4jScCI6Psgo5XAPZA8rXl0wWYf01rApPfSChy466k0oF5Uevuj1ief-rdy7l-4OwIMfXf0hrptOu15ftTWcU","qi":"6WhxXeJ7HuxH8wU8KdkMkc_ojoZWfW546UwchbTEnxAssMS_CWbXqUv-IbzmnHWxWSizAN2l9-qrYAG6G9wtAUc2GbazJMDkD1Eevy9RX9LCWvuiH_-cwWMJb-Ri8QA8PH3Ju19EzdhXI1TnAzLCXd0OgW9rB1KRGy0QaedHwGQ"}"#;

pub const RSA_OTHER_JWK: &str = r#"{"kty":"RSA","kid":"rsa-2","n":"oNWtcr7Be_KYAUgamZQr6G1UDtQu9-lgxyuwuh5U_G01UT_l60vn2_jP7W4-DLWgNQkIlwI90NizAdr_TH_Of9jz2khUOS6WcByD9LTLqM1BY3TslIkPNs2yLj28rSbiJsnmk51RPNVgMDXYE-Zf9idv125grZPSnBkWLO6i6BF3zZKIbZYKOLdeJ5TiJbaVAmls015WYZY0H_p5jEwd9S9DpxE_f664wvRnNN71bfVA7elP03gzpt6o_SFUEjNaSw0ZDEQ7HSxUffo2PiyS3FlVW59CFYg2HaPOqrzr6ujQaARxuEJ0dKI1CaW1kZwDiGEivXSisnAk_WlI1h7K_Q","e":"AQAB","d":"B2bAlYt4PB6Q8VwoAeHK9yZS1t-GWCPIr5m6h1zJJJhXpV53U5xEYP_X_RE_Rev0zFlW_cYIDLdFiO69pBUB7n8QJ78qMGXNB_8-m6asnvRvz3vMaFXPWgJeHQPRIzcVyLBZY057HtLN8KIFsygSn0a3fkvmzeNuhCmhDDPLfOTq2s18RxXPyqFJE2gAbEhTpqNjh1ISbo192cKBU_KAdOd4t4YBv2qXVfIQX5Cm9b1EIqkprUpu_EVxKmsPdCIW0gcnD_KGV_KYgAJyJLXmJadBqGX0WOPJJuPsNg3Yyyatm5KkHuJ-bXQWqNf0RF2vjYj6kiZUaA392m2saY2HiQ","p":"1u4I2VOdAFpH1oqLb2F0YDKk_p1lj9xjf3YPmi4oHubMxsR1QXWV1dfKjJwJ4pvIM86rF_gYxbF_iksP-kb4nBBSYNcgIfezm7v-x8_OR29dil_GNaLceQtNSp56I1OHvUh9NFv81ghR_X3SQc7p4rJJcfmo2W8NylgtMG74d0k","q":"v5Fo13NDGjMdMm5k6snMGOb3HNqboV3Ikyfz4Hfad67R1HMRecUde-rE0Oqdap0FIauAQbxPdIT_7dJpBHhUnXgClik4wbZQvTvD-cR1Ecr1C-1msL6-NhJPdj_ShkxCmdi1KoriW2fHHxH-v0zpGM2dnqjh5oeEvVCGvgEq8hU","dp":"HVrffIdN_zlVbHj5uFmwIl9oZ5opv-9S65q9YMqDEk1llJRKi4k60L0rXe8F7pxmSKUmexyYjY_DoqjD4uQEmpQkHDPloJ4LOu7_Sl0YiGsudHLGSJcY07N2eAWTGvYSqQiYiSkzLCxwvlWL_Q78pMjC_T0jEad4U7WdXmsZpnk","dq":"F0v1tg3cYTlKGbH3L95upbCg6K9lMdCX7d1z-R5aQSfPeMitnWNtXH6GhOmjTy3dS-Txag0elIsAHMnz34lKsQPBPMWyk0w6sWitQpizrABEoLi0PlZUB3tekoDcd1ya1N7X2V6efIM4YfzsQBN4XX3T51Ged0yPxf4fBMhbkqk","qi":"NZKrzNxU-VfTjqs-cbBYMOod4ixKdkeyYkUM3baqV_oPhgDGypOMMTclMBQXoB11_lGPrLa4xOCG9p9_UM2dZfn_YEU9uLSiTghZCXy9v95cJsvKdDSQSfyPw4ORw7WBSQP082UdEP-jvyvkl4Au6-dPf2Rb4TXZYcCDYc26wpU"}"#;

pub const EC_P256_JWK: &str = r#"{"kty":"EC","kid":"ec-p256","crv":"P-256","x":"rAtWo6L_cSCax350aI3WFJ8DXqEAv2F6D96yEoup9Ns","y":"CxkFvq2ipN6in-8rBbwkd9pk1ybZXZ5WF522fAx--3M","d":"Qtb6XdGXME1D4AFfRHUu31dUfFj7wDm3f5-CE3kEzCs"}"#;

pub const EC_P384_JWK: &str = r#"{"kty":"EC","kid":"ec-p384","crv":"P-384","x":"XCo5BmRWv4WenWAdJnHJ7GEYig61ucLmaDwARsl832AYhleGbj7VkXkmYCBr4V9s","y":"b0xY9E-qluv3izaM4wi_D45SwX7-Caz_0q4JKBbasjDhT31rzApJJrapOmRozPyD","d":"HcowJGH7PRjPTR-YfFqTgt_mqoWoACUb7X_hqrlCbIHKv-dwng-yclpNK6bQaZaC"}"#;

pub const EC_P521_JWK: &str = r#"{"kty":"EC","kid":"ec-p521","crv":"P-521","x":"AbHTN0k3JCJxFU2-7qcePXZQsyeNb7W6-McCgFCPmUgAMxdPa9I6Cs81rSEWWLF7sOXhnWb6egHOraXIIm0eg-6o","y":"ADlJ0dq3pxeRUYFkHeZ84zv__sCOWPd72cYMZ2e8p-ShVW6NRL3R5jLs0e45ycfsjQjHELZnMDbLhhz1bpqMd2IP","d":"ABnjy5ESRQo3TkrpFDRCMgkeBxfWl0vjE1ZKPXL5ogoY3Ec-utCBEusiOCKKmxxXtnnTpDyYptNxcclfcKt9gp0l"}"#;

pub const OCT_DIR_48_JWK: &str = r#"{"kty":"oct","k":"MQBLY66erN-HXmd6Yk_lS1Dc8tW_Ixp6DU3Ax4qiY7JX3rWkZtL40TVfFe4uA3B6"}"#;

pub const OCT_A256KW_JWK: &str = r#"{"kty":"oct","k":"SIpjXvdC5G8FDZhtD1IeOjEtdaDKpXOtZOeOedzFcGU"}"#;

pub const OCT_A128GCMKW_JWK: &str = r#"{"kty":"oct","k":"5d7bYBu3Ni1l8E93sUQQHA"}"#;

pub const OCT_PASSWORD_JWK: &str = r#"{"kty":"oct","k":"Y29ycmVjdCBob3JzZSBiYXR0ZXJ5IHN0YXBsZQ"}"#;

/// Decrypts with `RSA_JWK`; payload `{"messages":["hello"]}`.
pub const RSA_OAEP_256_A256GCM_JWE: &str = "eyJhbGciOiJSU0EtT0FFUC0yNTYiLCJlbmMiOiJBMjU2R0NNIiwia2lkIjoicnNhLTEifQ.CoGwSqRRoA3MsifxzAYqn_FJMvflvMH0cQDC-GnTjLgFzZuOZL34S0EkZ7acDFUHte322SmMOD6sWAGHMCS6k80xyNgJi6Xz8sHGMrV13HOMblcLCZydHTHM3oJiXm37Ru78cD9--inHrRSpHdBO5jDWqvauYC5ZFIPSdUt3desxUr4GvzhWVZ2qyWscSNpduakxS0nNWoCyEqP-s24_X3rvNSWVgLYLGNjxWQj4yZ5mLY0IcurYV0uUVPRAdumjbID9Grv1nK2y2_fEO_v6he4DIXDHCZl8yeJvqIozlCwuu5HngwmWRH-dA5zLw0EMHOHqDbEOXcSSCb1I_bPFaw.N1L0JsGEfpQ46LgO.M3zdCgO4eiiJBiWjYAcgiVKl7oMz8g.hICR_-NP4qicuA_TTCt-OQ";

/// Decrypts with `RSA_JWK`; payload `["a","b"]`.
pub const RSA_OAEP_A128CBC_HS256_JWE: &str = "eyJhbGciOiJSU0EtT0FFUCIsImVuYyI6IkExMjhDQkMtSFMyNTYifQ.iKJqeTtWYQi4NYoz3k4lfxi3oU1fALA4JVTu9zxQPUTOwZGNas1yCAVC8pBCBGotxVNbjqcfdP9wb_JSNic9TXzgaBwE7ITo39TCRj2c57uun4ehUb8-omxPRAZTMC3rcjCBVSMJ77RKQOOyGZuThGOi9qnnblY34rnSzZUhogbsgeqITEbTpnquDBqFX2MA33Lxhf-FIPnixMz0vUAELjWEBQ0bBGABhfzEWsIEtYjNeNETpIq7qB5OMkj8QoMXJawo8XemFmRCaxK8j8WLRTc6i0boYA1xVLu1Ob568qvOwJglvabtdsuxSL_lEnzZRYdVFMtTfTOPBKqFYQBJuw.AYJWVGttwgRU_wAzI9RDYg.7iPIscTxaHQMEwtlaKH-Ow.nFF6axJ3NE9Rzx2qBzZVrA";

/// Decrypts with `EC_P256_JWK`; apu `Alice`, apv `Bob`; payload `{"messages":["hello"]}`.
pub const ECDH_ES_P256_A256GCM_JWE: &str = "eyJhbGciOiJFQ0RILUVTIiwiZW5jIjoiQTI1NkdDTSIsImFwdSI6IlFXeHBZMlUiLCJhcHYiOiJRbTlpIiwiZXBrIjp7Imt0eSI6IkVDIiwiY3J2IjoiUC0yNTYiLCJ4IjoiTWlab1ZzbDNYNUZXTko5WVVoN0RheEtKeUxHX0RQdkw4N09PUF9YeUlhWSIsInkiOiJXLVpNMld1eExUZHVobXh0OUpqN0NnMXFMUm15ODAwTjZleVBXNm9XaGhrIn19..FiBS1k0JSzAlMZDo.lXQOGr99Mf51AEdIca6P6saj5YdqBA.u9QA7KIID9KWsL8NT40eGA";

/// Decrypts with `EC_P384_JWK`; payload `{"status":"delivered","count":2}`.
pub const ECDH_ES_A256KW_P384_A256CBC_HS512_JWE: &str = "eyJhbGciOiJFQ0RILUVTK0EyNTZLVyIsImVuYyI6IkEyNTZDQkMtSFM1MTIiLCJlcGsiOnsia3R5IjoiRUMiLCJjcnYiOiJQLTM4NCIsIngiOiJ2ZzRUMDk3VTlFRVpUWnRQZ0NoRDFoeDQ3b2xUV180bFN1Zkd3b25VTDZ5MXY3RWpCcW5TUm0zOUFwd3VXNWFnIiwieSI6IkVJbjhGeldpM0J1TmJkQ3diR3NzR2xQU1hYZV9KYmFOV1BSdW15MDVIS1h0SlBLbENNYjJqeW51d1E5TzZuTTAifX0.0Gpl-i163dUJhbLxPN1XesTO8P0D_u_SqlTJukUNgvrSdkyvTfbms0c8xCIXzhZ9xrz2nOSYvz0_OF9Wqbtcq3678KnnaWMa.N0TzWVKzxSZq0bRw2cnBUQ.3q3o8Y0RlksTmAp7O9oEXLN5gAdJ7120mBhEzIHH5F5ldB33QGU5RZCAlS1Ej3pq.s2uDd0HCxWJw3d69WDlvwOoSHCpYVqdgNzcVq9k41_o";

/// Decrypts with `EC_P521_JWK`; payload `{"messages":["hello"]}`.
pub const ECDH_ES_A128KW_P521_A128GCM_JWE: &str = "eyJhbGciOiJFQ0RILUVTK0ExMjhLVyIsImVuYyI6IkExMjhHQ00iLCJlcGsiOnsia3R5IjoiRUMiLCJjcnYiOiJQLTUyMSIsIngiOiJBQXpmdEFXRjh0Zzh0M19PeHQ2ckxvb1JQNGsxXzluYVpaQWhkTTZKTFBkVnV2NHU0VHFFdmFnUU1uWjFjUlVSM3NhSVg3dUpXUElHMmJURnVoTWNWUVRrIiwieSI6IkFOcklYakF2bVlqZ1dWQ21aTUdYdXRQLUptcVZJbE05RW1ZWDY3aG9mVUVsdVBsd0M5YnIxSkEwRXlya0tIZ2paeGlSamQ1RkMxbVA0QUxQZ2tfMlpZa18ifX0.FFJy0kPJC4lHRd6X_86XIpmeH_gNV68g.VTsUtNcnLVFUDY6-.e1EUpskBeErDccSYqXr2ajK6L8EWPw.eg6WiQPaU5M-AVaqj_sayQ";

/// Decrypts with `OCT_DIR_48_JWK`; payload `{"messages":["hello"]}`.
pub const DIR_A192CBC_HS384_JWE: &str = "eyJhbGciOiJkaXIiLCJlbmMiOiJBMTkyQ0JDLUhTMzg0In0..JjF_57pkKOiljg2QK3W55Q.igcRj5NQTypH4jYYLKNm1HTlXK5Jv1QN4__R9E6F20I.2pJJ9ZS5Tnkb-lVPy3mIrQUHMsexDAQY";

/// Decrypts with `OCT_A256KW_JWK`; payload `{"messages":["hello"]}`.
pub const A256KW_A192GCM_JWE: &str = "eyJhbGciOiJBMjU2S1ciLCJlbmMiOiJBMTkyR0NNIn0.Krpa_U2wOOd-V9OnyQMGzb0hsh7Nl1g4ppvif4tJAnI.ip8bXC1be20DXdGE.LXk3XP4GPLRD0q9ZnruOCIunGxRX6w.e1V3m2WkUfLmX6uDuH5X2A";

/// Decrypts with `OCT_A128GCMKW_JWK`; payload `{"messages":["hello"]}`.
pub const A128GCMKW_A128GCM_JWE: &str = "eyJhbGciOiJBMTI4R0NNS1ciLCJlbmMiOiJBMTI4R0NNIiwiaXYiOiJHajRCMjdnX0N1TjdGeXVCIiwidGFnIjoiVGljNzZQY0ZNZ3pwSDlaTGJtUlpOdyJ9.7yecbahtVQvBdmhloCWo8w.3NhhmChVjJEMlJ1f._G2InSV00eXFuczJsrCgcb53_UCmsg.xE5cGkjZa1xYqLCpadvNHw";

/// Decrypts with `OCT_PASSWORD_JWK`; payload `{"messages":["hello"]}`.
pub const PBES2_HS256_A128KW_A128CBC_HS256_JWE: &str = "eyJhbGciOiJQQkVTMi1IUzI1NitBMTI4S1ciLCJlbmMiOiJBMTI4Q0JDLUhTMjU2IiwicDJzIjoiaVRGWGtvWEptTUFaMnR0M3p0MmZkdyIsInAyYyI6NDA5Nn0.roIwRaOG5JsLUqC70WoA9fOToJ4bE-e4Vn7kDH2yBIScoMO5l7S-zA.HFaOHemurNOUPUHt6fDbbQ.8CHJlQsuHrc-eP3sMuVQ_7vzWg0B9RDmZHwZ7fYl-6k.swIosL2KlQYW51kF08cD1g";

/// Decrypts with `RSA_JWK`; payload is the non-JSON text `not json at all`.
pub const RSA_OAEP_256_NOT_JSON_JWE: &str = "eyJhbGciOiJSU0EtT0FFUC0yNTYiLCJlbmMiOiJBMjU2R0NNIn0.IlOCGHVXP0R4lAsVSsahskV2aTUa8-D2OQiedlk3amJMOhhVR_jhJnVCVaa1WXAk9AEU_m95LA9Iu8lOK0qSK2uDrTs3VLb9pmT4s8rPPiYUDHiLUB2WimZRFQjbPOoMNCGdVbGs29-zNnvmcgtmBDZvwbMawPWLimiiq6NYg9czzw_Fi4xDUBqmMOpDF4cAXEgLJfK12GaHF4mDZWEi3vZSrBhqToCol-zhkvUOLGQ4QCnuzLg9iqM_vi8luWK3QDeYjq17S5ePBXhJcWH5Muc6C1Trj1RWd0BKoWB6_RcVzK9isF2uFj7pe46CgW9c5DM9JCbD3hbhD5IsAKbBlg.9NkywtZBiSeuaot-.oCcKyAhOsQ1V6ohAqdRR.NetjF8BwFzdlfOp_8-n4lA";
