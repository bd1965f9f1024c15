use anyhow::Result;
use tcrshuffler::{GermlineReference, Receptor};

/// Small germline table in the tcrdist layout (extra columns are ignored)
#[allow(dead_code)]
pub const REFERENCE_TSV: &str = "id\torganism\tchain\tregion\tnucseq\tframe\tcdrs\taligned_protseq
TRBV19*01\thuman\tB\tV\tGATGGT\t1\tMNH..EY;SVGAGI;CASSI\tMNHEYSVGAGICASSI
TRBV12-1*01\thuman\tB\tV\tGATGGT\t1\tSGHDN;FVKESK;CASSL\tSGHDNFVKESKCASSL
TRBV5-1*01\thuman\tB\tV\tGATGGT\t1\tSGHRS;YFSETQ;CASSL\tSGHRSYFSETQCASSL
TRBV7-2*01\thuman\tB\tV\tGATGGT\t1\tSGHTA;SQNNAV;CASSL\tSGHTASQNNAVCASSL
TRBD1*01\thuman\tB\tD\tGGGACAGGGGGC\t1\t\tGTGG
TRBD2*01\thuman\tB\tD\tGGGACTAGCGGGGGGG\t1\t\tGTSGG
TRBJ1-1*01\thuman\tB\tJ\tTGAACACT\t1\tNTEAFF\tNTEAFFGQGTRLTVV
TRBJ2-5*01\thuman\tB\tJ\tACCAAGAG\t1\tQETQYF\tQETQYFGPGTRLLVL
TRBJ2-7*01\thuman\tB\tJ\tCTCCTACG\t1\tSYEQYF\tSYEQYFGPGTRLTVT
TRBJ1-4*01\thuman\tB\tJ\tCAACTAAT\t1\tTNEKLFF\tTNEKLFFGSGTQLSVL
TRAV12-1*01\thuman\tA\tV\tCGGAAG\t1\tDRGSQS;IYSNGD;CVVN\tDRGSQSIYSNGDCVVN
TRAV8-1*01\thuman\tA\tV\tGCCCAG\t1\tSSVPPY;YTSAAT;CAVN\tSSVPPYYTSAATCAVN
TRAJ42*01\thuman\tA\tJ\tTGAATT\t1\tNYGGSQGNLIF\tNYGGSQGNLIFGKGTKLSVKP
TRAJ43*01\thuman\tA\tJ\tTAATAA\t1\tNNNDMRF\tNNNDMRFGAGTRLTVKP
";

#[allow(dead_code)]
pub fn reference() -> Result<GermlineReference> {
    GermlineReference::from_reader(REFERENCE_TSV.as_bytes())
}

#[allow(dead_code)]
pub fn beta_receptors() -> Vec<Receptor> {
    vec![
        Receptor::new("TRBV19*01", "CASSSHAGGNTEAFF", "TRBJ1-1*01"),
        Receptor::new("TRBV12-1*01", "CASSLEETQYF", "TRBJ2-5*01"),
        Receptor::new("TRBV5-1*01", "CASSLQGAYEQYF", "TRBJ2-7*01"),
        Receptor::new("TRBV7-2*01", "CASSLAPGATNEKLFF", "TRBJ1-4*01"),
    ]
}

#[allow(dead_code)]
pub fn alpha_receptors() -> Vec<Receptor> {
    vec![
        Receptor::new("TRAV12-1*01", "CAVRGGSQGNLIF", "TRAJ42*01"),
        Receptor::new("TRAV8-1", "CATDMRF", "TRAJ43"),
    ]
}
