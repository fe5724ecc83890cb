#[allow(unused)]
pub fn generic_command_parse<F, I, T, E>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> Result<T, E>,
    T: PartialEq + std::fmt::Debug,
    I: std::fmt::Debug + Copy,
    E: std::fmt::Debug,
{
    let result = parser(input);
    assert!(
        result.is_ok(),
        "The input:\r\n{:?}\r\nThe result:\r\n{:#?}",
        input,
        result
    );
    let res = result.unwrap();
    assert_eq!(
        expect, res,
        "The expect:\r\n({:?}) should be same with the result:\r\n({:?})",
        expect, res
    );
}

#[allow(unused)]
pub fn generic_parse<F, I, T>(parser: F, input: I, expect: T)
where
    F: Fn(I) -> T,
    T: PartialEq + std::fmt::Debug,
    I: std::fmt::Debug,
{
    let result = parser(input);
    assert_eq!(
        expect, result,
        "The expect:\r\n({:?}) should be same with the result:\r\n({:?})",
        expect, result
    );
}
