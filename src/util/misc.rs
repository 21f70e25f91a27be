use std::fmt;

use crate::error;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn next_value<T>(it: &mut std::slice::Iter<'_, std::string::String>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit(format!("{}: value missing", opt)));
    n.parse()
        .unwrap_or_else(|e| error_exit(format!("{}: {} '{}'", opt, e, n)))
}

pub fn prompt() -> Option<String> {
    use std::io::{stdin, stdout, Write};
    print!("> ");
    stdout().flush().ok();
    let mut buf = String::new();
    match stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None, // EOF
        Ok(_) => Some(buf.trim().to_string()),
    }
}

pub fn error_exit<T: fmt::Display, U>(t: T) -> U {
    error!("{}", t);
    std::process::exit(1);
}

pub fn vec_count<T: PartialEq>(v: &[T], e: &T) -> usize {
    v.iter().filter(|&n| n == e).count()
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    if vv.is_empty() || vv.iter().any(|v| v.is_empty()) {
        return vec![];
    }

    let lens: Vec<usize> = vv.iter().map(|l| l.len()).collect();
    let mut idxs = vec![0; vv.len()];
    let mut i = idxs.len() - 1;
    let mut res = vec![];
    loop {
        let mut v = vec![];
        for (i1, &i2) in idxs.iter().enumerate() {
            v.push(&vv[i1][i2]);
        }
        res.push(v);

        // increment idxs
        loop {
            if idxs[i] < lens[i] - 1 {
                idxs[i] += 1;
                i = idxs.len() - 1;
                break;
            } else {
                idxs[i] = 0;
                if i == 0 {
                    return res;
                }
            }
            i -= 1;
        }
    }
}

#[test]
fn test_cartesian_product() {
    let vv = vec![vec![1, 2], vec![3], vec![4, 5]];
    let res = cartesian_product(&vv);
    assert_eq!(res.len(), 4);
    assert_eq!(res[0], vec![&1, &3, &4]);
    assert_eq!(res[3], vec![&2, &3, &5]);

    let empty: Vec<Vec<usize>> = vec![];
    assert!(cartesian_product(&empty).is_empty());
}

#[test]
fn test_vec_util() {
    assert_eq!(vec_count(&[1, 0, 1, 1], &1), 3);
    assert_eq!(vec_to_string(&[20, 30]), "[20, 30]");
}
