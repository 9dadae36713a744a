//! Fixed key material for tests, hex big-endian.

use crate::rsa::PrivateKey;
use crate::utils::biguint_from_hex;

pub(crate) struct FixtureKey {
    pub n: &'static str,
    pub e: &'static str,
    pub d: &'static str,
    pub p: &'static str,
    pub q: &'static str,
    pub dp: &'static str,
    pub dq: &'static str,
    pub qinv: &'static str,
}

/// 512 bits, e = 65537
pub(crate) const K512: FixtureKey = FixtureKey {
    n: "b2990f49c47dfa8cd400ae6a4d1b8a3b6a13642b23f28b003bfb97790ade9a4cc82b8b2a81747ddec08b6296e53a08c331687ef25c4bf4936ba1c0e6041e9d15",
    e: "10001",
    d: "8abd6a69f4d1a4b487f0ab8d7aaefd38609405c999984e30f567e1e8aeeff44e8b18bdb1ec78dfa31a55e32a48d7fb131f5af1f44d7d6b2ced2a9df5e5ae4535",
    p: "dab2f18048baa68de7df04d2d35d5d80e60e2dfa42d50a9b04219032715e46b3",
    q: "d10f2e66b1d0c13f10ef9927bf5324a379ca218146cbf9cafc795221f16a3117",
    dp: "21028979378114caae88f70d6b61d84f306a4b7e4ec0214dac9df449e8dab609",
    dq: "16b3ec5910a457e80e61c6a30f5eeb12a9ae2eb74845ec6983c3750ce497a09f",
    qinv: "6952b406e85060714c3ab766ba0d8ac9b70da3086ca3f262b02a84aa2fd61e55",
};

/// 1024 bits, e = 65537
pub(crate) const K1024: FixtureKey = FixtureKey {
    n: "a5e198f3b1619971e077ce9186615d47cc45340d7d1f8c4fa8f998884f934f62513c91c7b796f508b4090fc285c0c5ff57d722b4044d5f25f4dcd397b8360f3f440fc96473ec4ec9f39bf9eacc94d858f357b6ca19c239041f29153cea96a42c0ce032c5c6e65a328983268344798376492ed5c2d27392176db8920099e8ac0d",
    e: "10001",
    d: "77db0681e603c83450e5201b64064bb909ee62caf04270464aa875bee008674e79b612fb443acdb7c925d6fe4d585977c3074e2ad604f59fde4a0494d6643124f245132b34b1ebbe86d6224a003af425d26300cdb1089bef63f44c3d9ea34143045a3e1ee73f917cbeb7b96641a539b3f777cd081d69e9fbe0f7b081bd0a361d",
    p: "c5d940adfaee20d634f1aed7768dc40b050873f75e4d2eb192eba01db5896a90c4362c7a3f83cd3116aebc178dcb00cb321d760d9c9edfe4fb191f6c169b8c5b",
    q: "d6a304998f9c9c81afdc04d39adab29ef4c98574cfa73464bee5dc16c36e1d95b2276e0486f49020f5d06b7dc524032c3a2929f2f25c7b482e52bc835861b5b7",
    dp: "53b9ca8b55c36c15fa35c4bddda7c4acbd26849ccc45715b28479a6cb8243cfaa26e228861548f83148c4180de3a684d9519ae99b80bebc7e5130e9f193a1e3d",
    dq: "2846caf42df8cb7da28c7cf36059adaf1a6c3e78df069754586635d8a7afa0299916c1146466bc2d13339b182cc847382369da0f56df77dae1a670ed8cc6391d",
    qinv: "9ade4049453a6b8058ba9e7d59c2b87e7c132144b015b1a22202ef456ed025557526328f7ac0d6713d35a15c2dc4bc23d0f5adbad920cc3dda9be8a454d52ed8",
};

/// 1025 bits, e = 65537, the PSS encoding is one byte shorter than the block
pub(crate) const K1025: FixtureKey = FixtureKey {
    n: "16a65048b27be25c818fb1ee1935259dd4b77536f28633f0dc3e045472d1700faee3fe28843d9df28bbd4efc52b0b52d91377c6cc76fd1ab8710ca0fce4428c95713d6da9777114c186e4c44396e381f9e181543f938ebb1ae647a874a0c487fb8958e2c08acc39b75e26ea496188143506365fd8f77725f985713f8d85af4ccf",
    e: "10001",
    d: "4e381e9a708a14ba9355c48d18d0ca0fbf45b2af07ef2001771955aaaebb4bdd5d86517d6af3c03c990a35747fbd7274e3445396f749db361b44880cfdb1b588d900c5f788bab07d5a944081b1cdefcbc626ede2552b8e873c79f2efdb42344f60dbcc171b5805ca98bfcd34c8d7df3598483c8e003183dbcc484a6d621dd409",
    p: "162efaea3d74c4c6c1208b4196f8b41450a0b029924d5754225c7adcab2ce2fe7556acd6390ebd326b056a0db23391d101f0b41d8fc9b30ce8b6139a2fb84c309",
    q: "105611ec7aed11aad5f9ec181191e1cc06cd1778d05c01c32e0c8615a6ea2a42b3cf2d120b8a1dca1c57cb679f14f2c2e0ade7a07f72d12003354b7c91a824f17",
    dp: "ebb23e468eb21c0da7ec1facc465b4f223b92c0086753968b3ade5bab50236cd67eb847899c40073b0a5d62baf383e1476890331148df9db2eb36192d973501",
    dq: "8a802f16325d1d1cb7696131ee445589e55f8d50cdb6417af83f55cedc871424d133fd7ab03b1cb51ff7789ddf2f4bc2ce019b7a3310cfd4095f1fcfd15b315b",
    qinv: "84c1fba48842bd6c56dc245f9e8f3a7d181d437f70f95f9ff72d3f4cb980e425719312b57a3483868e3be010b2a9e1ad365bfa8a2bf381b9c9b0e45b20192501",
};

/// 2048 bits, e = 65537
pub(crate) const K2048: FixtureKey = FixtureKey {
    n: "b381ecae8047b493aac9c99b3712bb02bffd0746632607f02f7b70e25236c2db23ab5f8739a8adcde9e43624eecfb3708e68f1c2d86fc113d6467feeefa0e3d1d9ef5c1659bd6416796e222ea5a9bdc2ecec20ee37029bc21c1935c2c790989d957357a0b36fe0da3ddb1b0ca19b61a6f32d4e25b1aa31e3645b33594dc353ccb997f46c6dd86a0aff2abd2fcbb3634748d342236d6755ff7489c6a1eb243e26d1afd4f3db8be029e477ee09af5e8d154ec78ddd9b910b08ec379a81a6671f236a351396ec2d977dfa27fc229c14aa68169dc6829888eb0805f9dbc11a99661d8724bfad5435ef5efae3385fdf5268210497d123fd1964516d256ca4ef749485",
    e: "10001",
    d: "3a0515e46bd4c16a5e9accedbcfb47898d5727717a128ccba14d4620a0c4cfc3d78a48b22dd220d09c2205d8ccd242aec56e3e2b9046c422b9461d8bb3d5a3a29722654d596c2706ec9b75b39b7025c449f7cdc7b142c7e811aa4454d4a973eab0a790a72c82f8d666da8455022c757fbf6736b4659c7120e26067ff1c175f8f686c645ae41d659e1097aeb0fc877c39a54190610ef11c975936086af5f09bd542c8bfea92cd8d691f577201c3d51c75e968ad2889be681e110250828645a5f5bb2561faef726b73957ccb1bcf0fbb3ef3a92a1524c13e99854fd7a1929d5736c8f512c81b4344663d75afbb2913b2532e989add0c6c2cb07a1ec8db732d161",
    p: "daf753583b6f7f4bcadd2fbb56d064153c226c45dc334140d5d57ed6cbaa93e9fa5e6031050080295ae4cf255262906230588b5d959e14d1c130f6ab06acb67fcb16e4bd818c97d0836cd1b0c866cd97cf99c49d3fc8e2dcb1b7fe8336ba1170b9461c0d6641475f45baa83ccaa75fcb4ce92661ce6a755f5356b3ec7b9d22e1",
    q: "d1de246e61546a57adbb47b4cef50902e1f76d2475c483c35e2af89d444ced819d8ac1a1d1fb92a5cebe9034af35e5861306a87104b897590ab27170bc269c31d8408626683a495ba0659823dfd182b89a73972db2128299ca52a096a24945e5aaefc993182631b490087b6fc9ee12bde5f295ce849e9cdec754723e7459ca25",
    dp: "31e1fa38b581970c5b30bc78ff340638d834375a4ae9da49bced20322abfb766ac44e7c10314b41db7b93c7f921f2629583e33b1a42e192c17c8e1c8e082642904c9385efbae5dbf80d13f8bf87b8306bca2992a01a7f016badde1bb5eb250dacf3a6b9599dff134811c1ecb8a974ab973d2018e7289ca276742ef46467aebc1",
    dq: "6cb1e81e7f2c70737ed88b97fac470695ccd806aacd01e0a56c05cc95f3194a5580a20a586130cedf1794348f6222d0156e350e45034a6b68852c96c4116a23932aea08c4dd93a5b4964b4fa87968464c621edffcdc5c67c8e8c62fe01897fb926e2507d6db9826ee9566b5007bed558233b94194518bd58a8d674e121f3cb3d",
    qinv: "754059938b996f19c2ac25d8ae80473705ed6b32cbd985c92e2e16d64007bdc80e1db7543b40676a7eb24f3225696c4c4b01075ce302784d65fd464ee47efc081ec31d39a7e4d815eaeeb474bd3522449cbd0ea027e821fdc0d42e91aca70a4ba7046dc94038eec591af68b14a1b9e6fc99c2f890521efca566ec170f97ab046",
};

/// 2047 bits, e = 3, rejected by the loader
pub(crate) const K2047: FixtureKey = FixtureKey {
    n: "7163c842b2190a8970942b2764aed42d4124647b6f30e09a2da1c0e256aa2ee24e790c40c96a4bd66d75c371a915e0703c476b4e1a06f1bd38c5a3c10ae3bd30f4ef62a5aa4f512ad145a06c48e96469a22ce8e621e052f0669a8c34155512d82e55447f0b7e18da94bd911ac7b3aabe706843668964593ee71b2e5e484bcf0c7834101ab5d61bba1e63e6237af40489ce36a260dab70add4fbec24d659db0f7cac099b0a3aa4549acde7fc858a793a975e6cf65ca276b743525f0883980f6ad069bec346d787797386d50fe0c9734be967c7d84ae5b8f349b094079457c0c0c6fee34c42a0b832603804f71e49f3320081637512c6cbf2bb81b6f6be239846d",
    e: "3",
    d: "4b97dad7216607064b0d721a431f381e2b6d98524a2095bc1e6bd5ec39c6c9ec3450b2d5db9c328ef3a3d7a11b63eaf57d84f2341159f67e25d917d607427e20a34a41c3c6df8b71e0d9159d85f0ed9bc17345eec140374aef11b2cd638e0c901ee382ff5cfebb3c63290b672fcd1c7ef59ad799b0ed90d49a121ee98587df5cc161c584bc5887ae2a15e787e86ab1e803366150561e0b3b3ae28ebdcf32cd46dff317ed3e1b7590cc300d1d57c9288462d06d9fbe097e52b70dc4fca313ae09906e5fab0c24729b54fe35cc38fe1496419a902f35f08460952bd4783e0e930ba8b520f83eafe6fa6589bbab6e4f4bc5c285672c99f5055eec6a2a30b06e786b",
    p: "ba69948f830c296242da6bf9ae3fddb76a63dbf0761ed3f644bca96a2e1eb75fd1bbd9cd93c72330bcc2a97cfafd12ee27bfde0fb6ac152df2ec4ab12b11265b41bcb531e39f347fdf09e9562a6e5a7c020c6534df61c955dd772cc7b9d461fdeea2f3b83663302cfe5656c235d4ac94c81658ad179919cded8ab1be1e9aa369",
    q: "9bb7d344184526d29c689eddf0141bf65f013477e36b260e32ae42c680b2c5ada9181bff32b9f1bfbdd3c29f59fcc3f4b9ee4ce6766d18ca2fa4fe5c19d24b436c39a781f7a2972e59e616f58cabbb6132084008fe10ff4dddd054fd2e91cd7d043b8f9795a078816cdb5f2e895394e29c37c3e12de41d4f67f17e64baf92c65",
    dp: "7c46630a575d70ec2c919d511ed53e7a46ed3d4af969e2a42dd31b9c1ebf24ea8bd29133b7da1775d32c70fdfca8b7496fd53eb52472b8c94c9d8720c760c43cd67dce21426a22ffea069b8ec6f43c52ac08437894ebdb8e93a4c885268d96a949c1f7d02442201dfee439d6ce8dc863300ee5c8ba661133f3b1cbd41467179b",
    dq: "67cfe22d65836f3712f069e94ab812a43f5622fa979cc409771ed72f00772e73c61012aa21d14bd52937d714e6a882a3269eddeef99e1086ca6dfee81136dcd79d7bc5014fc1ba1ee69964a3b31d2796215ad55b540b54de93e038a8c9b688fe02d25fba63c0505648923f745b8d0dec68252d40c942be34eff654432750c843",
    qinv: "3ac767dcfae787f9a30bde6fada1c22daa746d10527b131dc7bec898782d15451c49a4fc0c91ecf8d670d5174c49903427ecd543cabb075d63220cf984ccfe72179dc284634cbedaf154532871669811f4ce512e57b2fbf70e87911090551835d0650dea17862efd1a3876cf7686dcb950c7e2c80eaa94f54273ae71edf8b10b",
};
impl FixtureKey {
    pub(crate) fn private_key(&self) -> PrivateKey {
        let h = |s: &str| biguint_from_hex(s).unwrap();
        PrivateKey::from_primes(h(self.n), h(self.e), h(self.d), h(self.p), h(self.q)).unwrap()
    }

    /// plaintext key record as stored inside a sealed container
    pub(crate) fn record_json(&self) -> String {
        format!(
            r#"{{"n":"{}","e":"{}","d":"{}","p":"{}","q":"{}","dp":"{}","dq":"{}","qinv":"{}"}}"#,
            self.n, self.e, self.d, self.p, self.q, self.dp, self.dq, self.qinv
        )
    }
}

pub(crate) fn key512() -> PrivateKey {
    K512.private_key()
}

pub(crate) fn key1024() -> PrivateKey {
    K1024.private_key()
}

pub(crate) fn key1025() -> PrivateKey {
    K1025.private_key()
}

pub(crate) fn key2048() -> PrivateKey {
    K2048.private_key()
}
